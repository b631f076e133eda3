//! Reader for the municipal election ("kv") XML statements published on
//! volby.cz.

use crate::model::election::{Municipality, Party, Statement, Turnout};
use chrono::NaiveDateTime;
use roxmltree::{Document, Node};
use std::str::FromStr;

pub const NAMESPACE: &str = "http://www.volby.cz/kv/";

#[derive(Debug, thiserror::Error)]
pub enum StatementError {
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("Missing element: {0}")]
    MissingElement(&'static str),
    #[error("Missing attribute {attribute} on {element}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },
    #[error("Invalid number {value:?} in {element}/@{attribute}")]
    InvalidNumber {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),
}

pub type Result<T> = std::result::Result<T, StatementError>;

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name((NAMESPACE, name)))
}

fn attribute<'a, 'input>(
    node: Node<'a, 'input>,
    element: &'static str,
    name: &'static str,
) -> Result<&'a str> {
    node.attribute(name)
        .ok_or(StatementError::MissingAttribute {
            element,
            attribute: name,
        })
}

fn number<T: FromStr>(node: Node, element: &'static str, name: &'static str) -> Result<T> {
    let value = attribute(node, element, name)?;
    value.trim().parse().map_err(|_| StatementError::InvalidNumber {
        element,
        attribute: name,
        value: value.to_string(),
    })
}

fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    value
        .parse::<NaiveDateTime>()
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
        .map_err(|_| StatementError::InvalidTimestamp(value.to_string()))
}

fn read_municipality(root: Node, obec: Node) -> Result<Municipality> {
    let timestamp = parse_timestamp(attribute(root, "VYSLEDKY_OBEC", "DATUM_CAS_GENEROVANI")?)?;

    Ok(Municipality {
        code: attribute(obec, "OBEC", "KODZASTUP")?.to_string(),
        name: attribute(obec, "OBEC", "NAZEVZAST")?.to_string(),
        councilor_seats: number(obec, "OBEC", "VOLENO_ZASTUP")?,
        is_final: attribute(obec, "OBEC", "JE_SPOCTENO")? != "false",
        timestamp,
    })
}

fn read_turnout(ucast: Node) -> Result<Turnout> {
    Ok(Turnout {
        submitted_envelopes: number(ucast, "UCAST", "ODEVZDANE_OBALKY")?,
        valid_votes: number(ucast, "UCAST", "PLATNE_HLASY")?,
        total_polling_divisions: number(ucast, "UCAST", "OKRSKY_CELKEM")?,
        processed_polling_divisions: number(ucast, "UCAST", "OKRSKY_ZPRAC")?,
    })
}

fn read_party(strana: Node) -> Result<Party> {
    Ok(Party {
        order: number(strana, "VOLEBNI_STRANA", "POR_STR_HLAS_LIST")?,
        name: attribute(strana, "VOLEBNI_STRANA", "NAZEV_STRANY")?.to_string(),
        votes: number(strana, "VOLEBNI_STRANA", "HLASY")?,
        candidate_count: number(strana, "VOLEBNI_STRANA", "KANDIDATU_POCET")?,
        reported_seats: number(strana, "VOLEBNI_STRANA", "ZASTUPITELE_POCET")?,
    })
}

/// Parse a `vysledky_obec` statement for a single municipality.
pub fn read_statement(xml: &str) -> Result<Statement> {
    let document = Document::parse(xml)?;
    let root = document.root_element();

    let obec = root
        .descendants()
        .find(|n| n.has_tag_name((NAMESPACE, "OBEC")))
        .ok_or(StatementError::MissingElement("OBEC"))?;
    let vysledek = child(obec, "VYSLEDEK").ok_or(StatementError::MissingElement("OBEC/VYSLEDEK"))?;
    let ucast =
        child(vysledek, "UCAST").ok_or(StatementError::MissingElement("OBEC/VYSLEDEK/UCAST"))?;

    let municipality = read_municipality(root, obec)?;
    let turnout = read_turnout(ucast)?;
    let parties = vysledek
        .children()
        .filter(|n| n.has_tag_name((NAMESPACE, "VOLEBNI_STRANA")))
        .map(read_party)
        .collect::<Result<Vec<_>>>()?;

    Ok(Statement {
        municipality,
        turnout,
        parties,
    })
}

/// Highest batch number announced by the `vysledky_okrsky` index document.
pub fn read_batch_count(xml: &str) -> Result<u32> {
    let document = Document::parse(xml)?;
    match document
        .descendants()
        .find(|n| n.has_tag_name((NAMESPACE, "DAVKA")))
    {
        Some(davka) => number(davka, "DAVKA", "PORADI_DAVKY"),
        None => Ok(0),
    }
}

/// Whether any element of a results batch belongs to municipality `code`.
pub fn batch_mentions(xml: &str, code: &str) -> Result<bool> {
    let document = Document::parse(xml)?;
    Ok(document
        .descendants()
        .any(|n| n.attribute("KODZASTUP") == Some(code)))
}

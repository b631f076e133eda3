pub mod cz_volby;

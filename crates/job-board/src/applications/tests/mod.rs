mod aggregate;
mod common;

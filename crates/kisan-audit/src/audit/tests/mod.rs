mod common;
mod evaluation;

mod errors;
mod parser;
mod properties;
mod samples;

//! tabex - tabular export CLI
//!
//! Turns a JSON array of row objects into a CSV, JSON or Excel file.
//!
//! ## Quick Start
//!
//! ```bash
//! # Export two columns to CSV in the download directory
//! tabex export --input assets.json --column host=Host --column user.name=Owner
//!
//! # Use a built-in column preset and write an Excel sheet
//! tabex export --input vulns.json --preset vulnerabilities --format xlsx
//!
//! # Pipe rows in, print the CSV
//! curl -s "$API/assets" | tabex export --stdout
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

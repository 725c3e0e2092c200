//! Summarizes a cassette file for maintenance and drift debugging.
//!
//! Usage: `cassette_dump [--json] <cassette.sql.yml>`

use std::{env, fs, process};

use sqltape::cassette::format::{self, ResponseRecord};

#[derive(Debug, serde::Serialize)]
struct EntrySummary {
    index: usize,
    query: String,
    params: usize,
    /// Row count, or `None` for a statement that produced no result set.
    rows: Option<usize>,
}

fn summarize(path: &str) -> Result<Vec<EntrySummary>, String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {path}: {e}"))?;
    let entries =
        format::decode_stream(&content).map_err(|e| format!("Failed to parse {path}: {e}"))?;
    Ok(entries
        .iter()
        .enumerate()
        .map(|(index, entry)| EntrySummary {
            index,
            query: entry.request.query.clone(),
            params: entry.request.params.as_ref().map_or(0, Vec::len),
            rows: match &entry.response {
                ResponseRecord::NoResult => None,
                ResponseRecord::Rows(rows) => Some(rows.len()),
            },
        })
        .collect())
}

fn run(json: bool, path: &str) -> Result<(), String> {
    let summaries = summarize(path)?;
    if json {
        let out = serde_json::to_string_pretty(&summaries)
            .map_err(|e| format!("Failed to serialize summary: {e}"))?;
        println!("{out}");
        return Ok(());
    }
    for s in &summaries {
        match s.rows {
            Some(rows) => {
                println!("{:>4}  {} param(s)  {rows} row(s)  {}", s.index, s.params, s.query);
            }
            None => {
                println!("{:>4}  {} param(s)  no result  {}", s.index, s.params, s.query);
            }
        }
    }
    println!("{} entries total", summaries.len());
    Ok(())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let (json, path) = match args.len() {
        2 => (false, args[1].as_str()),
        3 if args[1] == "--json" => (true, args[2].as_str()),
        _ => {
            eprintln!("Usage: cassette_dump [--json] <cassette.sql.yml>");
            process::exit(1);
        }
    };

    if let Err(e) = run(json, path) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

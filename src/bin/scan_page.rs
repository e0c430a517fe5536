//! Simple CLI that reads a listing page from a file (or stdin) and prints
//! the extracted candidates plus per-strategy counts as JSON.

use std::io::{self, Read};

use course_scout::{extract_candidates, CandidateLink, Strategy};
use serde::Serialize;

#[derive(Serialize)]
struct Output {
    candidates: Vec<CandidateLink>,
    counts: Vec<(Strategy, usize)>,
}

fn main() {
    let mut args = std::env::args().skip(1);
    let source = args.next();
    let base_url = args.next();

    let html = match source.as_deref() {
        None | Some("-") => {
            let mut buf = String::new();
            if io::stdin().read_to_string(&mut buf).is_err() {
                eprintln!("Failed to read from stdin");
                std::process::exit(1);
            }
            buf
        }
        Some(path) => match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                eprintln!("Failed to read {path}: {err}");
                std::process::exit(1);
            }
        },
    };

    let candidates = match extract_candidates(&html, base_url.as_deref()) {
        Ok(candidates) => candidates,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    let mut counts: Vec<(Strategy, usize)> = Vec::new();
    for strategy in Strategy::ALL {
        let n = candidates.iter().filter(|c| c.strategy == strategy).count();
        if n > 0 {
            counts.push((strategy, n));
        }
    }

    let output = Output { candidates, counts };
    println!("{}", serde_json::to_string_pretty(&output).unwrap_or_default());
}

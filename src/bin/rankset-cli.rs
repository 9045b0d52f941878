//! External driver: reads keys and range-count queries from standard
//! input, prints one count per query.
//!
//! Out of the library's scope proper (spec.md §1), this is the thin
//! "read n integers, read q query pairs, print `rank_le(hi) -
//! rank_lt(lo)` per query" program the library exists to serve, modeled
//! on `task/task.cpp`'s stdin protocol: first the key count and the
//! keys, then the query count and the `(lo, hi)` pairs.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;

use rankset::{OrderedSet, SplaySet};

#[derive(Parser, Debug)]
#[command(name = "rankset-cli", about = "Range-count queries over an ordered set of integers")]
struct Args {
    /// Use the splay-tree engine instead of the default red-black engine.
    #[arg(long)]
    splay: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let stdin = io::stdin();
    let mut tokens = stdin
        .lock()
        .lines()
        .flat_map(|line| {
            line.expect("failed to read from standard input")
                .split_whitespace()
                .map(str::to_owned)
                .collect::<Vec<_>>()
                .into_iter()
        });

    let mut next_int = |what: &str| -> Result<i64> {
        let tok = tokens.next().with_context(|| format!("expected {what}"))?;
        tok.parse::<i64>()
            .with_context(|| format!("{what} was not an integer: {tok:?}"))
    };

    let results = if args.splay {
        run(&mut SplayDriver(SplaySet::new()), &mut next_int)?
    } else {
        run(&mut RbDriver(OrderedSet::new()), &mut next_int)?
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (i, count) in results.iter().enumerate() {
        if i > 0 {
            write!(out, " ")?;
        }
        write!(out, "{count}")?;
    }
    writeln!(out)?;
    Ok(())
}

/// The two engines answer the same protocol; this trait lets `main`
/// stay oblivious to which one is in use.
trait Driver {
    fn insert(&mut self, key: i64);
    fn count_in_range(&mut self, lo: i64, hi: i64) -> usize;
}

struct RbDriver(OrderedSet<i64>);
struct SplayDriver(SplaySet<i64>);

impl Driver for RbDriver {
    fn insert(&mut self, key: i64) {
        self.0.insert(key);
    }
    fn count_in_range(&mut self, lo: i64, hi: i64) -> usize {
        self.0.count_in_range(&lo, &hi)
    }
}

impl Driver for SplayDriver {
    fn insert(&mut self, key: i64) {
        self.0.insert(key);
    }
    fn count_in_range(&mut self, lo: i64, hi: i64) -> usize {
        self.0.count_in_range(&lo, &hi)
    }
}

fn run(driver: &mut dyn Driver, next_int: &mut dyn FnMut(&str) -> Result<i64>) -> Result<Vec<usize>> {
    let num_keys = next_int("a key count")?;
    if num_keys < 0 {
        bail!("key count must be non-negative, got {num_keys}");
    }
    for _ in 0..num_keys {
        driver.insert(next_int("a key")?);
    }

    let num_queries = next_int("a query count")?;
    if num_queries < 0 {
        bail!("query count must be non-negative, got {num_queries}");
    }
    let mut results = Vec::with_capacity(num_queries as usize);
    for _ in 0..num_queries {
        let lo = next_int("a range lower bound")?;
        let hi = next_int("a range upper bound")?;
        results.push(driver.count_in_range(lo, hi));
    }
    Ok(results)
}

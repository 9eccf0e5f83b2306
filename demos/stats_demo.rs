use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use clap::Parser;
use hop_table::HashTable;
use hop_table::Insert;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'n', long = "values", default_value_t = 5000)]
    values: u64,
}

fn hash_u64(value: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn main() {
    let args = Args::parse();

    println!("Filling a table with {} values...", args.values);
    let mut table: HashTable<u64> = HashTable::new();

    let mut rejected = 0u64;
    for value in 0..args.values {
        let hash = hash_u64(value);
        match table.insert(hash, |&v| v == value, value) {
            Insert::Inserted => {}
            Insert::Duplicate(_) => panic!("value {value} inserted twice"),
            Insert::NeighborhoodFull(_) => rejected += 1,
        }
    }

    println!(
        "{} values in {} slots ({:.2}% load)",
        table.len(),
        table.capacity(),
        table.len() as f64 / table.capacity() as f64 * 100.0
    );
    if rejected > 0 {
        println!("{rejected} values could not be placed");
    }

    table.probe_histogram().print();
}

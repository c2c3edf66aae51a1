use chained_hash::HashTable;
use clap::Parser;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'n', long = "entries", default_value_t = 10_000)]
    entries: u32,

    #[arg(short = 'l', long = "load_factor", default_value_t = 0.75)]
    load_factor: f32,

    /// Shift keys left by this many bits, so that they differ only in their
    /// high bits.
    #[arg(short = 's', long = "shift", default_value_t = 0)]
    shift: u32,
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating HashTable with load factor {} and inserting {} keys (shift {})",
        args.load_factor, args.entries, args.shift
    );

    let mut table: HashTable<u32, u32> =
        HashTable::with_capacity_and_load_factor(0, args.load_factor);

    let mut resizes = 0;
    let mut capacity = table.capacity();
    for i in 0..args.entries {
        table.insert(i.wrapping_shl(args.shift), i);
        if table.capacity() != capacity {
            resizes += 1;
            capacity = table.capacity();
        }
    }

    println!(
        "Inserted {} keys into {} buckets after {} resizes",
        table.len(),
        table.capacity(),
        resizes
    );
    println!(
        "Final load: {:.2} entries per bucket",
        table.len() as f64 / table.capacity() as f64
    );

    table.print_chain_histogram();
    table.debug_stats().print();
}

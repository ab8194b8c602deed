/// Evaluate every two-level organization against a synthetic workload.

use ::twolevel::*;
use ::twolevel::stats::*;

use std::env;

fn run_static(records: &[BranchRecord], p: impl SimplePredictor) {
    let mut stat = BranchStats::new();
    for record in records.iter().filter(|r| r.is_conditional()) {
        stat.record(record, p.predict());
    }
    report(p.name(), &stat);
}

fn run_twolevel(records: &[BranchRecord], cfg: TwoLevelConfig, label: &str) {
    let mut p = cfg.build();
    let mut stat = BranchStats::new();
    for record in records.iter().filter(|r| r.is_conditional()) {
        let prediction = p.predict(record);
        stat.record(record, prediction);
        p.update(record);
    }
    report(label, &stat);
}

fn report(label: &str, stat: &BranchStats) {
    println!("[*] {:20} Global hit rate: {}/{} ({:.2}% correct) ({} misses)",
        label,
        stat.global_hits(),
        stat.global_brns(),
        stat.hit_rate() * 100.0,
        stat.global_miss(),
    );
}

fn config(organization: Organization, storage: HistoryStorage) -> TwoLevelConfig {
    TwoLevelConfig {
        organization,
        storage,
        history_len: 12,
        address_bits: 8,
        table_capacity: 256,
        associativity: 4,
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let len = args.get(1)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(100_000);

    let trace = SyntheticTrace::random_workload(64, len, 0xdead_beef);
    println!("[*] Synthesized {} records", trace.num_entries());
    let records = trace.as_slice();

    run_static(records, RandomPredictor);
    run_static(records, StaticPredictor(Outcome::T));
    run_static(records, StaticPredictor(Outcome::N));

    let runs = [
        (Organization::Gag, HistoryStorage::Hashed, "Gag"),
        (Organization::Gap, HistoryStorage::Hashed, "Gap"),
        (Organization::Pag, HistoryStorage::Hashed, "Pag/hashed"),
        (Organization::Pag, HistoryStorage::Associative, "Pag/associative"),
        (Organization::Pap, HistoryStorage::Hashed, "Pap/hashed"),
        (Organization::Pap, HistoryStorage::Associative, "Pap/associative"),
    ];
    for (organization, storage, label) in runs {
        run_twolevel(records, config(organization, storage), label);
    }
}

//! Example parking prepared transactions and recovering them at shutdown
//!
//! Participant workers PREPARE transactions concurrently and park their
//! sessions in the pool. Some decisions arrive and are committed; the rest
//! are still prepared when the tablet shuts down and get drained.
//!
//! Run with: cargo run --example prepared_recovery

use proven_prepared::{PreparedPool, PreparedPoolConfig};
use std::sync::Arc;

#[derive(Debug)]
struct TxConnection {
    id: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Prepared Pool Recovery Example ===\n");

    let config = PreparedPoolConfig::from_json(r#"{"capacity": 8}"#)?;
    let pool = Arc::new(PreparedPool::from_config(&config));
    println!("✓ Created prepared pool (capacity {})", pool.capacity());

    // 1. Workers prepare twelve transactions against a pool of eight
    let mut workers = Vec::new();
    for id in 0..12u64 {
        let pool = pool.clone();
        workers.push(tokio::spawn(async move {
            let dtid = format!("commerce:0:{}", id);
            match pool.insert(TxConnection { id }, dtid.clone()) {
                Ok(()) => Some(dtid),
                Err(rejected) => {
                    let (error, conn) = rejected.into_parts();
                    println!(
                        "  [worker] PREPARE {} refused ({}): rolling back session {}",
                        dtid,
                        error.code(),
                        conn.id
                    );
                    None
                }
            }
        }));
    }

    let mut prepared = Vec::new();
    for worker in workers {
        if let Some(dtid) = worker.await? {
            prepared.push(dtid);
        }
    }
    println!("✓ {} transactions prepared", prepared.len());

    // 2. Commit decisions arrive for half of them
    for dtid in prepared.iter().step_by(2) {
        if let Some(conn) = pool.take(dtid) {
            println!("  [commit] {} on session {}", dtid, conn.id);
        }
    }

    // 3. Shutdown: whatever is left is handed to recovery
    let remaining = pool.drain();
    println!("✓ Drained {} prepared sessions for recovery", remaining.len());
    for conn in &remaining {
        println!("  [recovery] session {}", conn.id);
    }

    let stats = pool.stats();
    println!(
        "\nStats: inserted={} taken={} drained={} rejected={}",
        stats.inserted, stats.taken, stats.drained, stats.capacity_rejections
    );

    Ok(())
}

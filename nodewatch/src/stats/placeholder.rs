//! Static stand-in payloads for the network-wide statistics.
//!
//! Served by the HTTP layer when placeholder data is enabled and the
//! statistics service is down. Shapes follow the upstream responses.

use super::query::StatQuery;
use chrono::{Duration, NaiveDate};
use serde_json::{json, Value};

const HISTORY_DAYS: i64 = 30;

pub fn network_summary() -> Value {
    json!({
        "totalNodes": 15000,
        "totalChannels": 85000,
        "totalCapacity": 5_000_000_000u64,
        "avgCapacityPerChannel": 58823,
        "avgChannelsPerNode": 5.67,
        "activeNodes": 12000,
        "activeChannels": 75000,
        "networkGrowth": {
            "nodes": 150,
            "channels": 850,
            "capacity": 50_000_000
        }
    })
}

pub fn network_graph() -> Value {
    let nodes: Vec<Value> = (0..5)
        .map(|i| {
            json!({
                "id": format!("placeholder-node-{i}"),
                "alias": format!("Node {}", i + 1),
                "capacity": 100_000_000u64 * (i + 1),
                "channels": 10 * (i + 1)
            })
        })
        .collect();

    let links: Vec<Value> = (0..4)
        .map(|i| {
            json!({
                "source": format!("placeholder-node-{i}"),
                "target": format!("placeholder-node-{}", i + 1),
                "capacity": 5_000_000u64 * (i + 1)
            })
        })
        .collect();

    json!({ "nodes": nodes, "links": links })
}

pub fn centralities() -> Value {
    let ranking = |base: f64| -> Vec<Value> {
        (0..5u32)
            .map(|i| {
                json!({
                    "pubkey": format!("placeholder-node-{i}"),
                    "value": base / f64::from(i + 1),
                    "rank": i + 1
                })
            })
            .collect()
    };

    json!({
        "betweenness": ranking(0.5),
        "eigenvector": ranking(0.4),
        "closeness": ranking(0.3),
        "weighted_betweenness": ranking(0.45),
        "weighted_eigenvector": ranking(0.35),
        "weighted_closeness": ranking(0.25)
    })
}

pub fn fee_market_overview() -> Value {
    json!({
        "average": {
            "base_fee_msat": 1000,
            "fee_rate_ppm": 500
        },
        "distribution": {
            "base_fee_msat": [
                { "range": "0-500", "count": 4200 },
                { "range": "500-1000", "count": 6100 },
                { "range": "1000-5000", "count": 2900 },
                { "range": "5000+", "count": 800 }
            ],
            "fee_rate_ppm": [
                { "range": "0-100", "count": 3100 },
                { "range": "100-500", "count": 5400 },
                { "range": "500-1000", "count": 3700 },
                { "range": "1000+", "count": 1800 }
            ]
        },
        "percentiles": {
            "p10": 150,
            "p25": 250,
            "p50": 400,
            "p75": 800,
            "p90": 1500
        }
    })
}

/// Thirty daily entries ending at `today`, oldest first
pub fn historical(today: NaiveDate) -> Value {
    let entries: Vec<Value> = (0..HISTORY_DAYS)
        .map(|i| {
            let date = today - Duration::days(HISTORY_DAYS - 1 - i);
            json!({
                "date": date.format("%Y-%m-%d").to_string(),
                "total_fees": 250_000 + i * 1_000,
                "total_capacity": 5_000_000_000i64 + i * 10_000_000,
                "active_channels": 75_000 + i * 25,
                "total_peers": 12_000 + i * 5,
                "total_volume": 1_500_000_000i64 + i * 5_000_000
            })
        })
        .collect();

    Value::Array(entries)
}

/// Placeholder for a network-wide query. Node-scoped queries have none.
pub fn for_query(query: &StatQuery, today: NaiveDate) -> Option<Value> {
    match query {
        StatQuery::NetworkSummary => Some(network_summary()),
        StatQuery::SimplifiedNetworkGraph => Some(network_graph()),
        StatQuery::TopCentralities => Some(centralities()),
        StatQuery::FeeMarketOverview => Some(fee_market_overview()),
        StatQuery::LimitedHistoricalData => Some(historical(today)),
        _ => None,
    }
}

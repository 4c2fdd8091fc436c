//! Sub-command parsing and execution.

use std::collections::BTreeSet;
use std::str::FromStr;

use helix_consensus::{
    estimate_daily_reward, BlockMetrics, DifficultyAdjuster, RewardSchedule, RewardTier,
    SmartRateCalculator,
};
use helix_hash::{parse_digest_hex, transform_digest, FractalHasher, FractalPow, SierpinskiSeed};
use helix_topology::{coordinate_of, energy_field, LinkPolicy, NodeId, TopologyConfig, TorusTopology};
use serde_json::{json, Value};
use tracing::debug;

use crate::config::CliConfig;
use crate::error::{Error, Result};

/// A parsed invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SmartRate {
        height: u64,
        tx_count: u64,
        active_nodes: u64,
        current_time: u64,
        genesis_time: Option<u64>,
    },
    Hash { input: String, level: u32 },
    BlockHash { data: String },
    Coord { node_id: i64 },
    Path { from: i64, to: i64, edges: String },
    Reward { height: u64 },
    Mine { data: String },
    JoinSim { nodes: u64 },
    Retarget { current: u64, block_times: String },
    Help,
}

impl Command {
    /// Parse arguments after the program name.
    pub fn parse(args: &[String]) -> Result<Self> {
        let Some(name) = args.first() else {
            return Err(Error::usage("missing command"));
        };
        let rest = &args[1..];

        let cmd = match name.as_str() {
            "smart-rate" => {
                require(name, rest, 4)?;
                Command::SmartRate {
                    height: arg(rest, 0, "height")?,
                    tx_count: arg(rest, 1, "tx_count")?,
                    active_nodes: arg(rest, 2, "active_nodes")?,
                    current_time: arg(rest, 3, "current_time")?,
                    genesis_time: optional(rest, 4, "genesis_time")?,
                }
            }
            "hash" => {
                require(name, rest, 1)?;
                Command::Hash {
                    input: rest[0].clone(),
                    level: optional(rest, 1, "level")?.unwrap_or(0),
                }
            }
            "block-hash" => {
                require(name, rest, 1)?;
                Command::BlockHash { data: rest[0].clone() }
            }
            "coord" => {
                require(name, rest, 1)?;
                Command::Coord { node_id: arg(rest, 0, "node_id")? }
            }
            "path" => {
                require(name, rest, 3)?;
                Command::Path {
                    from: arg(rest, 0, "from")?,
                    to: arg(rest, 1, "to")?,
                    edges: rest[2].clone(),
                }
            }
            "reward" => {
                require(name, rest, 1)?;
                Command::Reward { height: arg(rest, 0, "height")? }
            }
            "mine" => {
                require(name, rest, 1)?;
                Command::Mine { data: rest[0].clone() }
            }
            "join-sim" => {
                require(name, rest, 1)?;
                Command::JoinSim { nodes: arg(rest, 0, "nodes")? }
            }
            "retarget" => {
                require(name, rest, 2)?;
                Command::Retarget {
                    current: arg(rest, 0, "current")?,
                    block_times: rest[1].clone(),
                }
            }
            "-h" | "--help" | "help" => Command::Help,
            other => return Err(Error::usage(format!("unknown command: {other}"))),
        };
        Ok(cmd)
    }

    /// Execute and return the JSON document to print.
    pub fn run(&self, config: &CliConfig) -> Result<Value> {
        debug!(command = ?self, "running");
        match self {
            Command::SmartRate {
                height,
                tx_count,
                active_nodes,
                current_time,
                genesis_time,
            } => {
                let metrics = BlockMetrics::new(
                    *height,
                    *tx_count,
                    *active_nodes,
                    *current_time,
                    genesis_time.unwrap_or(config.genesis_time),
                );
                let result = SmartRateCalculator::standard().compute(&metrics)?;
                Ok(json!({
                    "metrics": metrics,
                    "result": result,
                    "tier": RewardTier::for_smart_rate(result.smart_rate),
                    "estimated_daily_reward": estimate_daily_reward(result.smart_rate),
                }))
            }
            Command::Hash { input, level } => {
                let digest = parse_digest_hex(input)?;
                let output = transform_digest(&digest, *level, SierpinskiSeed::global());
                Ok(json!({
                    "input": hex::encode(digest),
                    "level": level,
                    "output": hex::encode(output),
                }))
            }
            Command::BlockHash { data } => {
                let hash = FractalHasher::new(config.hash.fractal_level).hash(data.as_bytes());
                Ok(json!({
                    "hash": hex::encode(hash.hash),
                    "vortex_signature": hash.vortex_signature,
                    "energy_signature": hash.energy_signature,
                    "depth": hash.depth,
                }))
            }
            Command::Coord { node_id } => {
                let id = NodeId::try_from(*node_id)?;
                let coord = coordinate_of(id);
                Ok(json!({
                    "node_id": id,
                    "coordinate": coord,
                    "energy_field": energy_field(&coord),
                }))
            }
            Command::Path { from, to, edges } => {
                let (from, to) = (NodeId::try_from(*from)?, NodeId::try_from(*to)?);
                let topology = ring_topology(&parse_edges(edges)?)?;
                let path = topology.find_path(from, to)?;
                Ok(json!({
                    "from": from,
                    "to": to,
                    "hops": path.as_ref().map(|p| p.len().saturating_sub(1)),
                    "path": path,
                    "stats": topology.stats(),
                }))
            }
            Command::Reward { height } => {
                let schedule = RewardSchedule::default();
                Ok(json!({
                    "height": height,
                    "reward": schedule.reward_at(*height),
                    "issued": schedule.total_issued_through(*height),
                    "max_supply": schedule.max_supply(),
                }))
            }
            Command::Mine { data } => {
                let hasher = FractalHasher::new(config.hash.fractal_level);
                let pow = FractalPow::new(config.hash.pow_difficulty, config.hash.max_nonce);
                let solution = pow.mine(&hasher, data.as_bytes());
                Ok(json!({
                    "difficulty": pow.difficulty,
                    "max_nonce": pow.max_nonce,
                    "nonce": solution.as_ref().map(|s| s.nonce),
                    "hash": solution.as_ref().map(|s| hex::encode(s.hash.hash)),
                }))
            }
            Command::JoinSim { nodes } => {
                let topology = TorusTopology::new(config.topology);
                for id in 0..*nodes {
                    topology.join(NodeId(id))?;
                }
                let path = match nodes.checked_sub(1) {
                    Some(last) => topology.find_path(NodeId(0), NodeId(last))?,
                    None => None,
                };
                Ok(json!({
                    "link_policy": config.topology.link_policy,
                    "stats": topology.stats(),
                    "path": path,
                }))
            }
            Command::Retarget { current, block_times } => {
                let times = parse_list(block_times, "block time")?;
                let adjuster = DifficultyAdjuster::default();
                let invalid: Vec<u64> = times
                    .iter()
                    .copied()
                    .filter(|&t| !adjuster.validate_block_time(t))
                    .collect();
                Ok(json!({
                    "current": current,
                    "samples": times.len(),
                    "adjustment_interval": adjuster.adjustment_interval,
                    "invalid_block_times": invalid,
                    "next": adjuster.calculate_new_difficulty(*current, &times),
                }))
            }
            Command::Help => Ok(Value::String(usage().to_string())),
        }
    }
}

pub fn usage() -> &'static str {
    "helix - Helix consensus toolkit

Usage:
  helix smart-rate <height> <tx_count> <active_nodes> <current_time> [genesis_time]
  helix hash <hex32> [level]          Apply one fractal transform level
  helix block-hash <data>             Fractal block hash of UTF-8 data
  helix coord <node_id>               Torus coordinate and energy field
  helix path <from> <to> <a-b,b-c>    Route over a ring built from edges
  helix reward <height>               Block reward and issuance at height
  helix mine <data>                   Proof of work over UTF-8 data
  helix join-sim <n>                  Join nodes 0..n under the link policy
  helix retarget <difficulty> <t1,t2> Next difficulty from block times

Environment:
  HELIX_GENESIS_TIME    Genesis timestamp (default: 1640995200)
  HELIX_FRACTAL_LEVEL   Block hash levels (default: 3)
  HELIX_POW_DIFFICULTY  Leading zero bytes for mine (default: 1)
  HELIX_MAX_NONCE       Nonce search bound for mine (default: 1000000)
  HELIX_LINK_RADIUS     join-sim ring radius, or `manual` (default: 0.75)
  HELIX_LOG             Log filter (default: helix=info,warn)"
}

fn require(name: &str, rest: &[String], count: usize) -> Result<()> {
    if rest.len() < count {
        return Err(Error::usage(format!("{name} requires {count} argument(s)")));
    }
    Ok(())
}

fn arg<T: FromStr>(rest: &[String], index: usize, what: &str) -> Result<T> {
    let raw = rest
        .get(index)
        .ok_or_else(|| Error::usage(format!("missing {what}")))?;
    raw.parse()
        .map_err(|_| Error::usage(format!("invalid {what}: {raw}")))
}

fn optional<T: FromStr>(rest: &[String], index: usize, what: &str) -> Result<Option<T>> {
    if rest.len() > index {
        arg(rest, index, what).map(Some)
    } else {
        Ok(None)
    }
}

/// Parse `a-b,b-c,...` into id pairs. Empty input means no edges.
fn parse_edges(list: &str) -> Result<Vec<(NodeId, NodeId)>> {
    list.split(',')
        .map(str::trim)
        .filter(|edge| !edge.is_empty())
        .map(|edge| {
            let (a, b) = edge
                .split_once('-')
                .ok_or_else(|| Error::usage(format!("invalid edge: {edge}")))?;
            let id = |s: &str| {
                s.trim()
                    .parse::<u64>()
                    .map(NodeId)
                    .map_err(|_| Error::usage(format!("invalid edge: {edge}")))
            };
            Ok((id(a)?, id(b)?))
        })
        .collect()
}

/// Parse a comma-separated list of integers.
fn parse_list(list: &str, what: &str) -> Result<Vec<u64>> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            item.parse()
                .map_err(|_| Error::usage(format!("invalid {what}: {item}")))
        })
        .collect()
}

/// Nodes joined in ascending id order, then ring-linked in edge order.
fn ring_topology(edges: &[(NodeId, NodeId)]) -> Result<TorusTopology> {
    let topology = TorusTopology::new(TopologyConfig {
        link_policy: LinkPolicy::Manual,
    });
    let ids: BTreeSet<NodeId> = edges.iter().flat_map(|&(a, b)| [a, b]).collect();
    for id in ids {
        topology.join(id)?;
    }
    for &(a, b) in edges {
        topology.link_ring(a, b)?;
    }
    Ok(topology)
}

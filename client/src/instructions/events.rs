use amm_mining::{EpochEnabled, MiningRewardPaid, MiningStarted, MiningStopped};
use amm_pool::{
    FeeToUpdated, LiquidityApproved, LiquidityBurned, LiquidityMinted, LiquidityTransferred,
    PermissioningUpdated, ProtocolFeeMinted, ReservesSynced, Skimmed, Swapped,
};
use amm_staking::{RewardCollected, StakeEntered, StakeExited};
use anchor_lang::{prelude::*, Event};
use colorful::{Color, Colorful};
use serde::Serialize;
use std::fmt::Debug;

/// A decoded engine notification.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Notification {
    pub name: String,
    pub detail: String,
}

fn decode<E: Event + Debug>(data: &[u8]) -> Option<Notification> {
    let mut body = data.strip_prefix(E::DISCRIMINATOR)?;
    let event = E::deserialize(&mut body).ok()?;
    let name = std::any::type_name::<E>().rsplit("::").next().unwrap_or_default();
    Some(Notification {
        name: name.to_string(),
        detail: format!("{:?}", event),
    })
}

pub fn decode_notification(data: &[u8]) -> Notification {
    decode::<ReservesSynced>(data)
        .or_else(|| decode::<LiquidityMinted>(data))
        .or_else(|| decode::<LiquidityBurned>(data))
        .or_else(|| decode::<Swapped>(data))
        .or_else(|| decode::<ProtocolFeeMinted>(data))
        .or_else(|| decode::<Skimmed>(data))
        .or_else(|| decode::<LiquidityTransferred>(data))
        .or_else(|| decode::<LiquidityApproved>(data))
        .or_else(|| decode::<FeeToUpdated>(data))
        .or_else(|| decode::<PermissioningUpdated>(data))
        .or_else(|| decode::<StakeEntered>(data))
        .or_else(|| decode::<RewardCollected>(data))
        .or_else(|| decode::<StakeExited>(data))
        .or_else(|| decode::<EpochEnabled>(data))
        .or_else(|| decode::<MiningStarted>(data))
        .or_else(|| decode::<MiningStopped>(data))
        .or_else(|| decode::<MiningRewardPaid>(data))
        .unwrap_or_else(|| Notification {
            name: "Unknown".to_string(),
            detail: format!("{} bytes", data.len()),
        })
}

/// Print a command's result followed by the notifications it emitted.
pub fn report(result: serde_json::Value, events: &[Vec<u8>], json: bool) -> anyhow::Result<()> {
    let notifications: Vec<Notification> = events.iter().map(|e| decode_notification(e)).collect();
    if json {
        let output = serde_json::json!({
            "result": result,
            "notifications": notifications,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if let serde_json::Value::Object(fields) = &result {
        for (key, value) in fields {
            let value = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            println!("{}: {}", key.as_str().color(Color::Cyan), value);
        }
    }
    for notification in &notifications {
        println!(
            "{} {}",
            notification.name.as_str().color(Color::Green).bold(),
            notification.detail
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use amm_pool::U256;

    #[test]
    fn decodes_events_from_every_engine() {
        let pool = Pubkey::new_unique();
        let synced = ReservesSynced {
            pool,
            reserve_base: 7,
            reserve_token: U256::from(9u64),
        };
        let decoded = decode_notification(&synced.data());
        assert_eq!(decoded.name, "ReservesSynced");
        assert!(decoded.detail.contains("reserve_base: 7"));

        let paid = MiningRewardPaid {
            mining_pool: pool,
            miner: Pubkey::new_unique(),
            reward: U256::from(3u64),
        };
        assert_eq!(decode_notification(&paid.data()).name, "MiningRewardPaid");
    }

    #[test]
    fn unknown_bytes_are_reported_not_dropped() {
        let decoded = decode_notification(&[0u8; 4]);
        assert_eq!(decoded.name, "Unknown");
        assert_eq!(decoded.detail, "4 bytes");
    }
}

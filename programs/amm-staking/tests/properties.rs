mod common;

use common::{u, Fixture};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Stake { bob: bool, amount: u64 },
    Grow,
    Collect { bob: bool, burn: bool },
    Unstake { bob: bool },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<bool>(), 1u64..20_000_000).prop_map(|(bob, amount)| Op::Stake { bob, amount }),
        Just(Op::Grow),
        (any::<bool>(), any::<bool>()).prop_map(|(bob, burn)| Op::Collect { bob, burn }),
        any::<bool>().prop_map(|bob| Op::Unstake { bob }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn bookkeeping_stays_consistent(ops in proptest::collection::vec(op(), 1..10)) {
        let mut f = Fixture::new();
        for op in ops {
            let weights_before = [f.engines.staking.staker(&f.alice).weight, f.engines.staking.staker(&f.bob).weight];
            let rewards_before = f.rewards();
            let mut exited = None;
            match op {
                Op::Stake { bob, amount } => {
                    let who = if bob { f.bob } else { f.alice };
                    let _ = f.stake(&who, u(amount));
                }
                Op::Grow => f.grow(),
                Op::Collect { bob, burn } => {
                    let who = if bob { f.bob } else { f.alice };
                    if let Ok(reward) = f.run(|ledger, e| e.staking.collect(ledger, &mut e.pool, &who, &who, burn)) {
                        prop_assert!(reward.liquidity <= rewards_before);
                    }
                }
                Op::Unstake { bob } => {
                    let who = if bob { f.bob } else { f.alice };
                    if f.run(|ledger, e| e.staking.unstake(ledger, &mut e.pool, &who, &who, false)).is_ok() {
                        exited = Some(bob);
                    }
                }
            }

            let staking = &f.engines.staking;
            let alice = staking.staker(&f.alice);
            let bob = staking.staker(&f.bob);
            prop_assert_eq!(alice.staked_balance + bob.staked_balance, staking.total_staked);
            prop_assert_eq!(alice.weight + bob.weight, staking.total_weight);
            prop_assert!(f.receipts(&staking.address) >= staking.total_staked);
            prop_assert!(staking.rewards_credited <= f.rewards());
            prop_assert!(f.pending(&f.alice) + f.pending(&f.bob) <= f.rewards());
            if exited != Some(false) {
                prop_assert!(alice.weight >= weights_before[0]);
            }
            if exited != Some(true) {
                prop_assert!(bob.weight >= weights_before[1]);
            }
            prop_assert!(!staking.is_locked());
        }
    }
}

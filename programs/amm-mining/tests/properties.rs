mod common;

use amm_pool::U256;
use common::{u, Fixture};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Notify(u64),
    Mine { bob: bool, amount: u64 },
    Withdraw { bob: bool, amount: u64 },
    Collect { bob: bool },
    Exit { bob: bool },
    Advance(u64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1u64..1_000_000_000_000).prop_map(Op::Notify),
        (any::<bool>(), 1u64..1_000_000_000).prop_map(|(bob, amount)| Op::Mine { bob, amount }),
        (any::<bool>(), 1u64..1_000_000_000).prop_map(|(bob, amount)| Op::Withdraw { bob, amount }),
        any::<bool>().prop_map(|bob| Op::Collect { bob }),
        any::<bool>().prop_map(|bob| Op::Exit { bob }),
        (0u64..80).prop_map(Op::Advance),
    ]
}

proptest! {
    #[test]
    fn accumulator_is_monotonic_and_rewards_are_backed(ops in proptest::collection::vec(op(), 1..40)) {
        let mut f = Fixture::new();
        let mut funded = U256::zero();
        let mut paid = U256::zero();

        for op in ops {
            let stored_before = f.mining.reward_per_token_stored;
            match op {
                Op::Notify(reward) => {
                    if f.fund_and_notify(u(reward)).is_ok() {
                        funded = funded + u(reward);
                    }
                }
                Op::Mine { bob, amount } => {
                    let who = if bob { f.bob } else { f.alice };
                    let _ = f.mine(&who, u(amount));
                }
                Op::Withdraw { bob, amount } => {
                    let who = if bob { f.bob } else { f.alice };
                    let _ = f.withdraw(&who, u(amount));
                }
                Op::Collect { bob } => {
                    let who = if bob { f.bob } else { f.alice };
                    paid = paid + f.collect(&who).unwrap();
                }
                Op::Exit { bob } => {
                    let who = if bob { f.bob } else { f.alice };
                    paid = paid + f.exit(&who).unwrap();
                }
                Op::Advance(blocks) => {
                    let next = f.block() + blocks;
                    f.advance_to(next);
                }
            }

            prop_assert!(f.mining.reward_per_token_stored >= stored_before);
            let (alice, bob) = (f.alice, f.bob);
            let owed = f.earned(&alice) + f.earned(&bob);
            prop_assert!(paid + owed <= funded, "paid {} owed {} funded {}", paid, owed, funded);
            prop_assert_eq!(
                f.mining.balance_of(&alice) + f.mining.balance_of(&bob),
                f.mining.total_supply
            );
        }
    }
}

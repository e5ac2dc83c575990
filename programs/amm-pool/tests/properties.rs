mod common;

use amm_pool::{curve::ConstantProductCurve, Asset, U256};
use anchor_lang::prelude::*;
use common::{u, Fixture};
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn k(reserves: (u64, U256)) -> U256 {
    U256::from(reserves.0) * reserves.1
}

proptest! {
    #[test]
    fn swaps_never_shrink_k(
        reserve_base in 10_000u64..1_000_000_000_000,
        reserve_token in 10_000u64..u64::MAX / 2,
        fraction in 1u64..1_000,
        base_in in any::<bool>(),
    ) {
        let mut f = Fixture::seeded(reserve_base, u(reserve_token));
        let bob = f.bob;
        let before = f.pool.reserves();
        let result = if base_in {
            let amount_in = (reserve_base / 1_000 * fraction).max(1);
            f.fund(&bob, amount_in, U256::zero());
            let out = ConstantProductCurve::get_amount_out(u(amount_in), u(before.0), before.1).unwrap();
            f.swap_base_for_token(&bob, amount_in, out)
        } else {
            let amount_in = u((reserve_token / 1_000 * fraction).max(1));
            f.fund(&bob, 0, amount_in);
            let out = ConstantProductCurve::get_amount_out(amount_in, before.1, u(before.0)).unwrap();
            f.swap_token_for_base(&bob, amount_in, out.low_u64())
        };
        // dust inputs may quote a zero output
        if result.is_ok() {
            prop_assert!(k(f.pool.reserves()) >= k(before));
        }
    }

    #[test]
    fn mint_then_burn_returns_no_more_than_deposited(
        seed_base in 1_000_000u64..1_000_000_000,
        seed_token in 1_000_000u64..1_000_000_000_000,
        base in 1_000u64..1_000_000_000,
        token in 1_000u64..1_000_000_000_000,
    ) {
        let mut f = Fixture::seeded(seed_base, u(seed_token));
        let alice = f.alice;
        f.fund(&alice, base, u(token));
        let liquidity = f.add_liquidity(&alice, base, u(token));
        prop_assume!(liquidity.is_ok());
        let liquidity = liquidity.unwrap();

        if let Ok(amounts) = f.remove_liquidity(&alice, liquidity) {
            prop_assert!(amounts.base <= base);
            prop_assert!(amounts.token <= u(token));
        }
        prop_assert_eq!(f.pool.held_balances(&f.ledger).unwrap(), f.pool.reserves());
    }

    #[test]
    fn sync_twice_changes_nothing(
        donation_base in 0u64..1_000_000,
        donation_token in 0u64..1_000_000,
    ) {
        let mut f = Fixture::seeded(5_000_000, u(7_000_000));
        let (address, token) = (f.pool.address(), f.token());
        f.ledger.credit(Asset::Native, &address, u(donation_base)).unwrap();
        f.ledger.credit(token, &address, u(donation_token)).unwrap();

        f.pool.sync(&mut f.ledger).unwrap();
        let once = f.pool_bytes();
        f.pool.sync(&mut f.ledger).unwrap();
        prop_assert_eq!(f.pool_bytes(), once);
        prop_assert_eq!(f.pool.reserves(), (5_000_000 + donation_base, u(7_000_000 + donation_token)));
    }
}

#[test]
fn random_operation_sequences_keep_reserves_backed() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut f = Fixture::seeded(10_000_000, u(50_000_000));
    let traders: Vec<Pubkey> = (0..4).map(|_| Pubkey::new_unique()).collect();
    for trader in &traders {
        f.fund(trader, 1_000_000_000, u(5_000_000_000));
    }

    for _ in 0..500 {
        let who = traders[rng.random_range(0..traders.len())];
        let before = f.pool.reserves();
        match rng.random_range(0..4) {
            0 => {
                let amount_in = rng.random_range(1..1_000_000u64);
                if let Ok(out) = ConstantProductCurve::get_amount_out(u(amount_in), u(before.0), before.1) {
                    if f.swap_base_for_token(&who, amount_in, out).is_ok() {
                        assert!(k(f.pool.reserves()) >= k(before));
                    }
                }
            }
            1 => {
                let amount_in = u(rng.random_range(1..5_000_000u64));
                if let Ok(out) = ConstantProductCurve::get_amount_out(amount_in, before.1, u(before.0)) {
                    if f.swap_token_for_base(&who, amount_in, out.low_u64()).is_ok() {
                        assert!(k(f.pool.reserves()) >= k(before));
                    }
                }
            }
            2 => {
                let base = rng.random_range(1_000..1_000_000u64);
                let token = u(rng.random_range(1_000..5_000_000u64));
                let _ = f.add_liquidity(&who, base, token);
            }
            _ => {
                let held = f.pool.balance_of(&who);
                if !held.is_zero() {
                    let _ = f.remove_liquidity(&who, held / u(2) + u(1));
                }
            }
        }
        assert_eq!(f.pool.held_balances(&f.ledger).unwrap(), f.pool.reserves());
        assert!(!f.pool.is_locked());
    }
}

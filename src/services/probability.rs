use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

/// 概率之和与 1.0 比较的容差
pub const PROBABILITY_EPSILON: f64 = 1e-4;

/// 普通奖品（不含兜底奖）概率之和的校验结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PoolBalance {
    /// 之和在容差内等于 1.0
    Balanced,
    /// 之和不足 1.0，携带兜底奖应吸收的缺口
    Shortfall(f64),
    /// 之和超过 1.0，配置必须整体拒绝
    Overflow(f64),
}

/// 十进制精确求和，避免 f64 连加的累积误差
pub fn sum_probabilities<I: IntoIterator<Item = f64>>(probabilities: I) -> f64 {
    probabilities
        .into_iter()
        .filter_map(Decimal::from_f64)
        .sum::<Decimal>()
        .to_f64()
        .unwrap_or(0.0)
}

pub fn check_sum(total: f64) -> PoolBalance {
    if total > 1.0 + PROBABILITY_EPSILON {
        PoolBalance::Overflow(total)
    } else if total < 1.0 - PROBABILITY_EPSILON {
        PoolBalance::Shortfall(fallback_residual(total))
    } else {
        PoolBalance::Balanced
    }
}

/// 校验一组普通奖品概率
pub fn check_pool<I: IntoIterator<Item = f64>>(probabilities: I) -> PoolBalance {
    check_sum(sum_probabilities(probabilities))
}

/// 兜底奖应承担的剩余概率（舍入产生的负数收敛到 0）
pub fn fallback_residual(total: f64) -> f64 {
    let residual = Decimal::from_f64(total)
        .map(|t| Decimal::ONE - t)
        .and_then(|r| r.to_f64())
        .unwrap_or(0.0);
    residual.max(0.0)
}

/// 之和是否在容差内等于 1.0（活动配置完整性检查）
pub fn is_balanced(total: f64) -> bool {
    (total - 1.0).abs() < PROBABILITY_EPSILON
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_is_exact() {
        // f64 直接相加时 0.1 + 0.3 != 0.4，十进制求和必须精确
        let total = sum_probabilities([0.1, 0.3]);
        assert_eq!(total, 0.4);
        assert_eq!(fallback_residual(total), 0.6);
    }

    #[test]
    fn test_shortfall_creates_residual() {
        match check_pool([0.1, 0.3]) {
            PoolBalance::Shortfall(residual) => assert_eq!(residual, 0.6),
            other => panic!("expected shortfall, got {other:?}"),
        }
    }

    #[test]
    fn test_overflow_rejected() {
        match check_pool([0.6, 0.5]) {
            PoolBalance::Overflow(total) => assert!(total > 1.0 + PROBABILITY_EPSILON),
            other => panic!("expected overflow, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_sum_is_balanced() {
        assert_eq!(check_pool([0.5, 0.3, 0.2]), PoolBalance::Balanced);
    }

    #[test]
    fn test_within_epsilon_is_balanced() {
        assert_eq!(check_pool([0.5, 0.49995]), PoolBalance::Balanced);
        assert_eq!(check_pool([0.5, 0.50005]), PoolBalance::Balanced);
    }

    #[test]
    fn test_rebalance_after_update() {
        // 普通奖品从 0.5 调到 0.7，兜底奖应从 0.5 降到 0.3
        let total = sum_probabilities([0.7]);
        assert_eq!(fallback_residual(total), 0.3);
        // 调到 1.1 必须整体拒绝
        assert!(matches!(check_sum(1.1), PoolBalance::Overflow(_)));
    }

    #[test]
    fn test_residual_clamped_to_zero() {
        // 容差内略超 1.0 时兜底概率不得为负
        assert_eq!(fallback_residual(1.00005), 0.0);
    }

    #[test]
    fn test_many_small_terms() {
        let probabilities = vec![0.0001; 10_000];
        assert_eq!(check_pool(probabilities), PoolBalance::Balanced);
    }

    #[test]
    fn test_is_balanced() {
        assert!(is_balanced(1.0));
        assert!(is_balanced(0.99995));
        assert!(!is_balanced(0.9));
        assert!(!is_balanced(1.1));
    }
}

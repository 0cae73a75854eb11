use crate::entities::prize_entity as prizes;
use rand::Rng;

/// 奖品选择策略。实现只需提供 select 一个操作，
/// 便于替换为其它分配算法（测试用确定性实现等）。
pub trait DrawStrategy: Send + Sync {
    /// 从本次请求的奖品快照中选出一个奖品。
    /// 仅当列表为空、或扫描穿底且无兜底奖可回落时返回 None。
    fn select(&self, prize_list: &[prizes::Model]) -> Option<prizes::Model>;
}

/// 按配置概率加权随机选择
///
/// 单次均匀采样 r ∈ [0,1)，按配置顺序（id 升序）累计概率扫描，
/// 返回累计值首次覆盖 r 的奖品。无库存奖品跳过且不累计，
/// r 落在其区间时顺延到下一个有库存奖品；扫描穿底则回落兜底奖。
pub struct WeightedRandomStrategy;

impl DrawStrategy for WeightedRandomStrategy {
    fn select(&self, prize_list: &[prizes::Model]) -> Option<prizes::Model> {
        if prize_list.is_empty() {
            return None;
        }

        let mut rng = rand::rng();
        let r: f64 = rng.random();
        let mut cumulative = 0.0;

        for prize in prize_list {
            // 无库存奖品跳过
            if !prize.is_available() {
                continue;
            }

            cumulative += prize.probability;
            if r <= cumulative {
                return Some(prize.clone());
            }
        }

        // 舍入误差或库存耗尽：回落到兜底奖
        prize_list.iter().find(|p| p.is_fallback).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn prize(id: i64, name: &str, probability: f64, stock: Option<i64>) -> prizes::Model {
        prizes::Model {
            id,
            name: name.to_string(),
            total_stock: stock,
            available_stock: stock,
            probability,
            is_fallback: false,
            created_at: None,
            updated_at: None,
        }
    }

    fn fallback(id: i64, probability: f64) -> prizes::Model {
        prizes::Model {
            is_fallback: true,
            ..prize(id, "谢谢参与", probability, None)
        }
    }

    #[test]
    fn test_empty_list_returns_none() {
        let strategy = WeightedRandomStrategy;
        assert!(strategy.select(&[]).is_none());
    }

    #[test]
    fn test_probability_distribution() {
        let strategy = WeightedRandomStrategy;
        let prize_list = vec![
            prize(1, "Gold", 0.1, Some(100_000)),
            prize(2, "Silver", 0.3, Some(100_000)),
            prize(3, "Bronze", 0.6, Some(100_000)),
        ];

        let total_draws = 10_000;
        let mut counts: HashMap<String, u32> = HashMap::new();
        for _ in 0..total_draws {
            let selected = strategy.select(&prize_list).expect("non-empty pool");
            *counts.entry(selected.name).or_insert(0) += 1;
        }

        // 允许 2% 的误差
        assert_probability(counts["Gold"], total_draws, 0.1, 0.02);
        assert_probability(counts["Silver"], total_draws, 0.3, 0.02);
        assert_probability(counts["Bronze"], total_draws, 0.6, 0.02);
    }

    fn assert_probability(count: u32, total: u32, expected: f64, margin: f64) {
        let actual = count as f64 / total as f64;
        assert!(
            (actual - expected).abs() < margin,
            "expected {expected} but got {actual}"
        );
    }

    #[test]
    fn test_out_of_stock_prize_never_selected() {
        let strategy = WeightedRandomStrategy;
        let prize_list = vec![
            prize(1, "Gold", 0.5, Some(0)),
            prize(2, "Silver", 0.5, Some(100)),
            fallback(3, 0.0),
        ];

        let mut silver = 0;
        for _ in 0..10_000 {
            let selected = strategy.select(&prize_list).expect("fallback configured");
            assert_ne!(selected.name, "Gold");
            if selected.name == "Silver" {
                silver += 1;
            }
        }
        // Gold 的区间顺延给了 Silver 与兜底奖, Silver 仍约占一半
        assert!(silver > 0);
    }

    #[test]
    fn test_all_stock_exhausted_falls_back() {
        let strategy = WeightedRandomStrategy;
        let prize_list = vec![prize(1, "Gold", 1.0, Some(0)), fallback(2, 0.0)];

        for _ in 0..100 {
            let selected = strategy.select(&prize_list).expect("fallback configured");
            assert!(selected.is_fallback);
        }
    }

    #[test]
    fn test_exhausted_without_fallback_returns_none() {
        let strategy = WeightedRandomStrategy;
        let prize_list = vec![prize(1, "Gold", 1.0, Some(0))];
        assert!(strategy.select(&prize_list).is_none());
    }
}

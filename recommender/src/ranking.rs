//! Top-N selection over a score slice.

/// Returns the indices of the `top_n` highest scores, descending. The sort
/// is stable, so equal scores keep their original matrix order.
pub fn top_n_indices(scores: &[f64], top_n: usize) -> Vec<(usize, f64)> {
    let mut ranked: Vec<(usize, f64)> = scores.iter().copied().enumerate().collect();
    ranked.sort_by(|left, right| right.1.total_cmp(&left.1));
    ranked.truncate(top_n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_come_back_in_non_increasing_order() {
        let scores = [0.2, 0.9, 0.4, 0.7];
        let ranked = top_n_indices(&scores, 4);
        assert_eq!(ranked, vec![(1, 0.9), (3, 0.7), (2, 0.4), (0, 0.2)]);
    }

    #[test]
    fn the_result_is_exactly_the_n_highest() {
        let scores = [0.5, 0.1, 0.8, 0.3, 0.9];
        let ranked = top_n_indices(&scores, 2);
        assert_eq!(ranked, vec![(4, 0.9), (2, 0.8)]);
    }

    #[test]
    fn ties_keep_the_original_order() {
        let scores = [0.5, 0.7, 0.5, 0.7];
        let ranked = top_n_indices(&scores, 4);
        assert_eq!(ranked, vec![(1, 0.7), (3, 0.7), (0, 0.5), (2, 0.5)]);
    }

    #[test]
    fn asking_for_more_than_available_returns_everything() {
        let scores = [0.1, 0.2];
        assert_eq!(top_n_indices(&scores, 10).len(), 2);
        assert!(top_n_indices(&[], 3).is_empty());
    }
}

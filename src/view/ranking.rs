use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Answer;

/// Final ordering rule once resolution and subsidy tiers tie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tiebreak {
    /// Most likely first
    #[default]
    Probability,
    /// Creation index ascending; answers without an index go last
    Index,
}

/// Answers in display order, plus how many were cut off
#[derive(Debug, Clone, Serialize)]
pub struct RankedAnswerList {
    pub displayed: Vec<Answer>,
    pub more_count: usize,
    /// Nothing worth rendering: no answers, or a lone answer that must sum to one
    pub show_none: bool,
}

/// User-selectable sort for answer tables
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerSort {
    Alphabetical,
    ProbAsc,
    ProbDesc,
}

/// Rank answers for display, most likely first
pub fn rank_answers(
    answers: &[Answer],
    resolutions: Option<&HashMap<String, f64>>,
    should_sum_to_one: bool,
    max_count: Option<usize>,
) -> RankedAnswerList {
    rank_answers_by(
        answers,
        resolutions,
        should_sum_to_one,
        max_count,
        Tiebreak::Probability,
    )
}

/// Rank answers for display.
///
/// Tiers, each breaking ties of the previous one:
/// 1. answers in `resolutions`, by allocated percentage descending (no-op without a map)
/// 2. resolved answers with a subsidy pool, by subsidy descending
/// 3. `tiebreak`
///
/// The sort is stable, so fully tied answers keep their input order.
pub fn rank_answers_by(
    answers: &[Answer],
    resolutions: Option<&HashMap<String, f64>>,
    should_sum_to_one: bool,
    max_count: Option<usize>,
    tiebreak: Tiebreak,
) -> RankedAnswerList {
    let mut sorted: Vec<&Answer> = answers.iter().collect();
    sorted.sort_by(|a, b| {
        descending_present_first(resolution_key(a, resolutions), resolution_key(b, resolutions))
            .then_with(|| descending_present_first(subsidy_key(a), subsidy_key(b)))
            .then_with(|| compare_tiebreak(a, b, tiebreak))
    });

    let limit = max_count.unwrap_or(usize::MAX);
    let displayed: Vec<Answer> = sorted.into_iter().take(limit).cloned().collect();
    let more_count = answers.len() - displayed.len();

    let show_none = answers.is_empty() || (should_sum_to_one && answers.len() == 1);

    RankedAnswerList {
        displayed,
        more_count,
        show_none,
    }
}

/// Sort answers for a table view
pub fn sort_answers(answers: &[Answer], sort: AnswerSort) -> Vec<Answer> {
    let mut sorted = answers.to_vec();
    match sort {
        AnswerSort::Alphabetical => {
            sorted.sort_by_key(|a| a.text.to_lowercase());
        }
        AnswerSort::ProbAsc => {
            sorted.sort_by(|a, b| a.display_probability().total_cmp(&b.display_probability()));
        }
        AnswerSort::ProbDesc => {
            sorted.sort_by(|a, b| b.display_probability().total_cmp(&a.display_probability()));
        }
    }
    sorted
}

fn resolution_key(answer: &Answer, resolutions: Option<&HashMap<String, f64>>) -> Option<f64> {
    resolutions.and_then(|r| r.get(&answer.id).copied())
}

fn subsidy_key(answer: &Answer) -> Option<f64> {
    if answer.is_resolved() {
        answer.subsidy_pool
    } else {
        None
    }
}

/// Larger keys first; answers without a key after all keyed ones
fn descending_present_first(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn compare_tiebreak(a: &Answer, b: &Answer, tiebreak: Tiebreak) -> Ordering {
    let by_prob = || b.display_probability().total_cmp(&a.display_probability());

    match tiebreak {
        Tiebreak::Probability => by_prob(),
        Tiebreak::Index => match (a.index, b.index) {
            (Some(i), Some(j)) => i.cmp(&j),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => by_prob(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::answer::fixtures::answer;
    use crate::models::AnswerResolution;

    fn ids(list: &RankedAnswerList) -> Vec<&str> {
        list.displayed.iter().map(|a| a.id.as_str()).collect()
    }

    #[test]
    fn test_truncates_to_max_count() {
        let answers = vec![answer("b", 0.3), answer("a", 0.7)];

        let ranked = rank_answers(&answers, None, true, Some(1));

        assert_eq!(ids(&ranked), vec!["a"]);
        assert_eq!(ranked.more_count, 1);
        assert!(!ranked.show_none);
    }

    #[test]
    fn test_displayed_plus_more_equals_total() {
        let answers: Vec<Answer> = (0..7)
            .map(|i| answer(&format!("a{}", i), f64::from(i) / 10.0))
            .collect();

        for max in [None, Some(0), Some(3), Some(7), Some(20)] {
            let ranked = rank_answers(&answers, None, false, max);
            assert_eq!(ranked.displayed.len() + ranked.more_count, answers.len());
        }
    }

    #[test]
    fn test_show_none() {
        let one = vec![answer("only", 1.0)];

        assert!(rank_answers(&[], None, true, None).show_none);
        assert!(rank_answers(&[], None, false, None).show_none);
        assert!(rank_answers(&one, None, true, None).show_none);
        assert!(!rank_answers(&one, None, false, None).show_none);
    }

    #[test]
    fn test_resolutions_rank_first() {
        let answers = vec![answer("a", 0.9), answer("b", 0.05), answer("c", 0.05)];
        let resolutions = HashMap::from([("c".to_string(), 60.0), ("b".to_string(), 40.0)]);

        let ranked = rank_answers(&answers, Some(&resolutions), true, None);

        assert_eq!(ids(&ranked), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_resolved_subsidy_ranks_before_unresolved() {
        let mut small = answer("small", 0.2);
        small.resolution = Some(AnswerResolution::Yes);
        small.subsidy_pool = Some(50.0);
        let mut big = answer("big", 0.1);
        big.resolution = Some(AnswerResolution::No);
        big.subsidy_pool = Some(500.0);
        let open = answer("open", 0.9);

        let answers = vec![open, small, big];
        let ranked = rank_answers(&answers, None, false, None);

        assert_eq!(ids(&ranked), vec!["big", "small", "open"]);
    }

    #[test]
    fn test_probability_uses_resolution() {
        let mut lost = answer("lost", 0.8);
        lost.resolution = Some(AnswerResolution::No);
        let answers = vec![lost, answer("live", 0.4)];

        let ranked = rank_answers(&answers, None, false, None);

        assert_eq!(ids(&ranked), vec!["live", "lost"]);
    }

    #[test]
    fn test_index_tiebreak() {
        let mut first = answer("first", 0.1);
        first.index = Some(0);
        let mut second = answer("second", 0.8);
        second.index = Some(1);
        let unindexed = answer("unindexed", 0.9);

        let answers = vec![unindexed, second, first];
        let ranked = rank_answers_by(&answers, None, false, None, Tiebreak::Index);

        assert_eq!(ids(&ranked), vec!["first", "second", "unindexed"]);
    }

    #[test]
    fn test_ties_keep_input_order_and_rerank_is_stable() {
        let answers = vec![answer("x", 0.5), answer("y", 0.5), answer("z", 0.5)];

        let first = rank_answers(&answers, None, false, None);
        let second = rank_answers(&first.displayed, None, false, None);

        assert_eq!(ids(&first), vec!["x", "y", "z"]);
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_out_of_range_probability_passes_through() {
        let answers = vec![answer("a", 0.4), answer("weird", 1.5), answer("neg", -0.2)];

        let ranked = rank_answers(&answers, None, false, None);

        assert_eq!(ids(&ranked), vec!["weird", "a", "neg"]);
        assert_eq!(ranked.displayed[0].prob, 1.5);
    }

    #[test]
    fn test_sort_answers() {
        let mut b = answer("b", 0.2);
        b.text = "bravo".to_string();
        let mut a = answer("a", 0.7);
        a.text = "Alpha".to_string();
        let answers = vec![b, a];

        let alpha: Vec<String> = sort_answers(&answers, AnswerSort::Alphabetical)
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(alpha, vec!["a", "b"]);

        let asc = sort_answers(&answers, AnswerSort::ProbAsc);
        assert_eq!(asc[0].id, "b");

        let desc = sort_answers(&answers, AnswerSort::ProbDesc);
        assert_eq!(desc[0].id, "a");
    }
}

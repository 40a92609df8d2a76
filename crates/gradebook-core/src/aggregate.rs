//! Best-six aggregate selection.

use std::cmp::Ordering;

use crate::model::ComputedSubject;

/// The subjects counted towards a student's aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct BestSix {
    pub aggregate: u32,
    pub core: Vec<ComputedSubject>,
    pub electives: Vec<ComputedSubject>,
}

/// Better grade first; on equal grades the higher composite wins, then
/// subject name keeps the order total.
pub fn compare_subjects(a: &ComputedSubject, b: &ComputedSubject) -> Ordering {
    a.grade_value
        .cmp(&b.grade_value)
        .then_with(|| b.composite_score.total_cmp(&a.composite_score))
        .then_with(|| a.subject.cmp(&b.subject))
}

/// Pick the best `core_count` core and `elective_count` elective subjects
/// and sum their grade values.
///
/// Smaller groups contribute whatever they have; nothing is padded.
pub fn best_six(
    subjects: &[ComputedSubject],
    is_core: impl Fn(&str) -> bool,
    core_count: usize,
    elective_count: usize,
) -> BestSix {
    let (mut core, mut electives): (Vec<ComputedSubject>, Vec<ComputedSubject>) = subjects
        .iter()
        .cloned()
        .partition(|s| is_core(&s.subject));

    core.sort_by(compare_subjects);
    electives.sort_by(compare_subjects);
    core.truncate(core_count);
    electives.truncate(elective_count);

    let aggregate = core
        .iter()
        .chain(electives.iter())
        .map(|s| u32::from(s.grade_value))
        .sum();

    BestSix {
        aggregate,
        core,
        electives,
    }
}

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gradebook_core::config::GradingSettings;
use gradebook_core::engine::{compute_class_statistics, grade_cohort, process_students};
use gradebook_core::model::{Roster, ScoreRecord, StudentRecord, SubjectRawScore};

fn make_roster(students: usize, settings: &GradingSettings) -> Roster {
    let students = (0..students)
        .map(|i| {
            let scores = settings
                .subjects
                .iter()
                .enumerate()
                .map(|(j, subject)| {
                    let seed = ((i * 31 + j * 17) % 97) as f64;
                    (
                        subject.clone(),
                        SubjectRawScore {
                            section_a: (seed * 0.4).round(),
                            section_b: (seed * 0.6).round(),
                            sba_score: ((i + j) % 40) as f64,
                            score: None,
                        },
                    )
                })
                .collect();
            StudentRecord {
                id: format!("S{i:05}"),
                name: format!("Student {i}"),
                record: ScoreRecord {
                    scores,
                    ..Default::default()
                },
                periods: BTreeMap::new(),
            }
        })
        .collect();
    Roster {
        students,
        facilitators: BTreeMap::new(),
    }
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let settings = GradingSettings::default();

    for size in [40, 400, 4000] {
        let roster = make_roster(size, &settings);

        group.bench_function(format!("statistics/{size}"), |b| {
            b.iter(|| compute_class_statistics(black_box(&roster.students), black_box(&settings)))
        });

        let stats = compute_class_statistics(&roster.students, &settings);
        group.bench_function(format!("process/{size}"), |b| {
            b.iter(|| {
                process_students(
                    black_box(&stats),
                    black_box(&roster.students),
                    black_box(&roster.facilitators),
                    black_box(&settings),
                )
            })
        });

        group.bench_function(format!("full/{size}"), |b| {
            b.iter(|| grade_cohort(black_box(&roster), black_box(&settings)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);

//! The `gradebook init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create gradebook.toml
    if std::path::Path::new("gradebook.toml").exists() {
        println!("gradebook.toml already exists, skipping.");
    } else {
        std::fs::write("gradebook.toml", SAMPLE_SETTINGS)?;
        println!("Created gradebook.toml");
    }

    // Create example roster
    std::fs::create_dir_all("rosters")?;
    let example_path = std::path::Path::new("rosters/example.toml");
    if example_path.exists() {
        println!("rosters/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ROSTER)?;
        println!("Created rosters/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit gradebook.toml with your subjects and thresholds");
    println!("  2. Run: gradebook validate --settings gradebook.toml");
    println!("  3. Run: gradebook process --roster rosters/example.toml");

    Ok(())
}

const SAMPLE_SETTINGS: &str = r#"# gradebook settings

subjects = ["English Language", "Mathematics", "Integrated Science", "Social Studies", "French", "Information and Communication Technology"]
core_subjects = ["English Language", "Mathematics", "Integrated Science", "Social Studies"]
use_t_distribution = false
sort_order = "aggregate-asc"
default_category = "Pass"

[normalization]
mode = "single"
enabled = false
subject = "Mathematics"
max_score = 100

[sba]
enabled = true
sba_weight = 30
exam_weight = 70

[thresholds]
A1 = 1.5
B2 = 1.0
B3 = 0.5
C4 = 0.0
C5 = -0.5
C6 = -1.0
D7 = -1.5
E8 = -2.0

[[categories]]
label = "Distinction"
min = 6
max = 12

[[categories]]
label = "Merit"
min = 13
max = 24

[[categories]]
label = "Credit"
min = 25
max = 36

[[categories]]
label = "Pass"
min = 37
max = 48

[[categories]]
label = "Weak"
min = 49
max = 54
"#;

const EXAMPLE_ROSTER: &str = r#"[facilitators]
"Mathematics" = "Mr. Adjei"
"English Language" = "Mrs. Owusu"

[[students]]
id = "S001"
name = "Ama Serwaa"

[students.record]
attendance = 58
conduct = "Respectful"

[students.record.scores."English Language"]
section_a = 32
section_b = 41
sba_score = 78

[students.record.scores.Mathematics]
section_a = 38
section_b = 45
sba_score = 85

[students.record.scores."Integrated Science"]
section_a = 29
section_b = 36
sba_score = 70

[students.record.scores."Social Studies"]
section_a = 35
section_b = 40
sba_score = 74

[students.record.scores.French]
section_a = 20
section_b = 25
sba_score = 60

[students.record.scores."Information and Communication Technology"]
section_a = 36
section_b = 44
sba_score = 88

[[students]]
id = "S002"
name = "Yaw Darko"

[students.record]
attendance = 54

[students.record.scores."English Language"]
section_a = 25
section_b = 30
sba_score = 62

[students.record.scores.Mathematics]
score = 61

[students.record.scores."Integrated Science"]
section_a = 33
section_b = 40
sba_score = 75

[students.record.scores."Social Studies"]
section_a = 27
section_b = 31
sba_score = 66

[students.record.scores.French]
section_a = 30
section_b = 35
sba_score = 80

[students.record.scores."Information and Communication Technology"]
section_a = 22
section_b = 28
sba_score = 58

[[students]]
id = "S003"
name = "Efua Mensah"

[students.record.scores."English Language"]
section_a = 38
section_b = 47
sba_score = 90

[students.record.scores.Mathematics]
section_a = 24
section_b = 29
sba_score = 55

[students.record.scores."Integrated Science"]
section_a = 36
section_b = 42
sba_score = 81

[students.record.scores."Social Studies"]
section_a = 31
section_b = 38
sba_score = 72

[students.record.scores.French]
section_a = 26
section_b = 30
sba_score = 64

[students.record.scores."Information and Communication Technology"]
section_a = 30
section_b = 39
sba_score = 77
"#;

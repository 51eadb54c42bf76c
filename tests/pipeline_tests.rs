use std::collections::BTreeSet;
use std::path::Path;

use classtalk::render::stage_label;
use classtalk::{
    Extra, HeuristicsConfig, Speaker, build_dialogue, build_segmentation, lesson_dir,
    parse_subtitle_file, process_lesson, write_artifacts,
};

fn fixture() -> Vec<classtalk::SubtitleLine> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/lesson.json");
    parse_subtitle_file(&path).unwrap()
}

#[test]
fn test_fixture_speaker_attribution() {
    let lines = fixture();
    let dialogue = build_dialogue(&lines, &HeuristicsConfig::default());

    let speakers: Vec<Speaker> = dialogue.labeled.iter().map(|l| l.speaker).collect();
    assert_eq!(speakers.len(), 21);
    assert_eq!(&speakers[..6], &[
        Speaker::Teacher,
        Speaker::Teacher,
        Speaker::Class,
        Speaker::Teacher,
        Speaker::Teacher,
        Speaker::Student,
    ]);
    assert_eq!(speakers[7], Speaker::Teacher);
    assert_eq!(speakers[19], Speaker::Teacher);
    assert_eq!(speakers[20], Speaker::Class);

    assert_eq!(dialogue.turns.len(), 8);
    for pair in dialogue.turns.windows(2) {
        assert_ne!(pair[0].speaker, pair[1].speaker);
    }
}

#[test]
fn test_fixture_stage_segmentation() {
    let lines = fixture();
    let config = HeuristicsConfig::default();
    let segmentation = build_segmentation(&lines, &config);

    assert!(!segmentation.used_fallback);
    let bounds: Vec<(usize, usize)> = segmentation
        .ranges
        .iter()
        .map(|r| (r.start_index, r.end_index))
        .collect();
    assert_eq!(bounds, vec![(0, 4), (5, 8), (9, 13), (14, 16), (17, 20)]);

    let labels: Vec<String> = config
        .segmentation
        .stage_names()
        .map(|name| stage_label(&lines, &segmentation.ranges, name))
        .collect();
    assert_eq!(labels[0], "00:00 - 00:29，约0.5分钟");
    assert_eq!(labels[4], "01:42 - 02:05，约0.4分钟");
}

#[test]
fn test_fixture_verbatim_dialogue() {
    let lines = fixture();
    let artifacts = process_lesson("t", &lines, &BTreeSet::new(), &HeuristicsConfig::default());

    let blocks: Vec<&str> = artifacts.dialogue_verbatim.split("\n\n").collect();
    assert_eq!(blocks[0], "【逐字稿增强版（对话体）】");
    assert_eq!(blocks[1], "老师：上课，同学们好。");
    assert_eq!(blocks[2], "全班：老师好。");
    assert_eq!(blocks[3], "老师：今天这节课我们走进曹冲的故事，谁能讲一讲？");
    assert_eq!(blocks[5], "老师：为什么不直接称呢？");
    assert_eq!(blocks[8], "全班：老师再见。");
}

#[test]
fn test_fixture_end_to_end_files() {
    let lines = fixture();
    let extras = BTreeSet::from([Extra::LessonPlan, Extra::ObservationNote]);
    let artifacts = process_lesson(
        "名师课堂：《曹冲称象》（三年级）",
        &lines,
        &extras,
        &HeuristicsConfig::default(),
    );

    let root = tempfile::tempdir().unwrap();
    let dir = lesson_dir(root.path(), "BV1xx411c7mD");
    let paths = write_artifacts(&dir, "BV1xx411c7mD", &artifacts).unwrap();

    let plan = std::fs::read_to_string(paths.lesson_plan.unwrap()).unwrap();
    assert!(plan.contains("- 课题：曹冲称象"));
    assert!(plan.contains("3. 探究建模（00:54 - 01:23，约0.5分钟）"));

    let note = std::fs::read_to_string(paths.observation_note.unwrap()).unwrap();
    assert!(note.contains("- 课堂片段：我们来看天平；左边放一个西瓜"));

    let labeled = std::fs::read_to_string(paths.speaker_labeled).unwrap();
    assert_eq!(labeled.lines().count(), 21);
    assert!(labeled.starts_with("老师：上课\n老师：同学们好\n全班：老师好"));
}

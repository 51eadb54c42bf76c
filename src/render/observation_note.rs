use super::{LessonContext, short_text};

pub const OBSERVATION_NOTE_TITLE: &str = "【听课记录（学习者视角）】";

const EXCERPT_CHARS: usize = 72;

/// Render an observation note with one excerpt per lesson stage
pub fn render_observation_note(ctx: &LessonContext<'_>) -> String {
    let mut lines = vec![
        OBSERVATION_NOTE_TITLE.to_string(),
        String::new(),
        "一、听课定位".to_string(),
        "- 关注主线：问题设计、追问方式、抽象建模、课堂生成处理、迁移落地。".to_string(),
        String::new(),
        "二、课堂基本信息".to_string(),
        format!("- 课题：{}", ctx.theme()),
        format!("- 来源视频：{}", ctx.title),
        String::new(),
        "三、关键课堂片段与学习发现".to_string(),
    ];

    for (i, name) in ctx.stages.stage_names().enumerate() {
        lines.push(format!("{}. {}", i + 1, name));
        let Some(range) = ctx.ranges.get(name) else {
            lines.push("- 课堂片段：未识别。".to_string());
            continue;
        };
        lines.push(format!(
            "- 课堂片段：{}",
            short_text(&ctx.excerpt(range), EXCERPT_CHARS)
        ));
        lines.push(format!("- 时间：{}", ctx.label(name)));
        lines.push("- 我看到的教学智慧：".to_string());
        lines.push("- 我可迁移的做法：".to_string());
    }

    lines.extend([
        String::new(),
        "四、评语（学习者立场）".to_string(),
        "- 最值得学习：".to_string(),
        "- 可改进点：".to_string(),
        String::new(),
        "五、我的后续行动计划".to_string(),
        "- 课后复盘学生是否说出完整关系链（情境句+符号句+结论句）。".to_string(),
    ]);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::SegmentationConfig;
    use crate::models::{StageRange, StageRanges, SubtitleLine};

    #[test]
    fn test_observation_note_marks_missing_stages() {
        let lines: Vec<SubtitleLine> = ["同学们好", "老师好", "今天这节课我们学习称象"]
            .iter()
            .enumerate()
            .map(|(i, t)| SubtitleLine {
                start: i as f64 * 3.0,
                end: i as f64 * 3.0 + 2.0,
                text: t.to_string(),
            })
            .collect();
        let ranges = StageRanges::new(vec![
            StageRange::new(0, "导入与任务建立", 0, 2).unwrap(),
        ]);
        let stages = SegmentationConfig::default();
        let ctx = LessonContext {
            title: "称象",
            lines: &lines,
            ranges: &ranges,
            stages: &stages,
        };

        let note = render_observation_note(&ctx);

        assert!(note.contains("1. 导入与任务建立\n- 课堂片段：同学们好；老师好"));
        assert!(note.contains("- 时间：00:00 - 00:08，约0.1分钟"));
        assert_eq!(note.matches("- 课堂片段：未识别。").count(), 4);
    }
}

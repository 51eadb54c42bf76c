use super::{LessonContext, UNRECOGNIZED, short_text};

pub const LESSON_PLAN_TITLE: &str = "【教案（课例学习版）】";

const EXCERPT_CHARS: usize = 60;

/// Render a lesson plan whose teaching flow follows the recorded stages
pub fn render_lesson_plan(ctx: &LessonContext<'_>) -> String {
    let mut lines = vec![
        LESSON_PLAN_TITLE.to_string(),
        String::new(),
        "一、课题与课型".to_string(),
        format!("- 课题：{}", ctx.theme()),
        format!("- 来源视频：{}", ctx.title),
        "- 课时：1课时".to_string(),
        String::new(),
        "二、教学目标".to_string(),
        "- 知识与技能：能结合课堂情境说清本课核心关系。".to_string(),
        "- 过程与方法：经历“情境复述→问题聚焦→模型建构→迁移应用”的过程。".to_string(),
        "- 思维与表达：能把自然语言转为符号语言，并进行简要论证。".to_string(),
        String::new(),
        "三、教学流程（按课堂实录时间）".to_string(),
    ];

    for (i, name) in ctx.stages.stage_names().enumerate() {
        lines.push(format!("{}. {}（{}）", i + 1, name, ctx.label(name)));
        match ctx.ranges.get(name) {
            Some(range) => {
                lines.push(format!(
                    "- 课堂实录：{}",
                    short_text(&ctx.excerpt(range), EXCERPT_CHARS)
                ));
                lines.push(format!("- 实录句数：{}句", range.line_count()));
            }
            None => lines.push(format!("- 课堂实录：{}。", UNRECOGNIZED)),
        }
        lines.push(String::new());
    }

    lines.extend([
        "四、板书建议".to_string(),
        format!("- 围绕“{}”梳理关键关系与结论。", ctx.theme()),
    ]);

    lines.join("\n")
}

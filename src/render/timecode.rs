use crate::models::{StageRange, StageRanges, SubtitleLine};

/// Label rendered for a stage with no recovered range
pub const UNRECOGNIZED: &str = "未识别";

/// Format seconds as MM:SS, or HH:MM:SS once an hour is reached
///
/// Rounds half to even and clamps negative input to zero.
pub fn format_time(seconds: f64) -> String {
    let total = seconds.round_ties_even().max(0.0) as u64;
    let (minutes, secs) = (total / 60, total % 60);
    let (hours, minutes) = (minutes / 60, minutes % 60);
    if hours > 0 {
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{:02}:{:02}", minutes, secs)
    }
}

/// Time span label of a range, e.g. `01:05 - 03:10，约2.1分钟`
///
/// Returns `None` when the range points outside `lines`.
pub fn range_label(lines: &[SubtitleLine], range: &StageRange) -> Option<String> {
    let first = lines.get(range.start_index)?;
    let last = lines.get(range.end_index)?;
    let t0 = first.start;
    let t1 = last.end;
    let minutes = (t1 - t0).max(0.0) / 60.0;
    Some(format!(
        "{} - {}，约{:.1}分钟",
        format_time(t0),
        format_time(t1),
        minutes
    ))
}

/// Label for a named stage, or [`UNRECOGNIZED`] if it has no usable range
pub fn stage_label(lines: &[SubtitleLine], ranges: &StageRanges, name: &str) -> String {
    ranges
        .get(name)
        .and_then(|r| range_label(lines, r))
        .unwrap_or_else(|| UNRECOGNIZED.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(start: f64, end: f64) -> SubtitleLine {
        SubtitleLine {
            start,
            end,
            text: "x".to_string(),
        }
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(65.4), "01:05");
        assert_eq!(format_time(3661.0), "01:01:01");
        assert_eq!(format_time(-3.0), "00:00");
        // ties round to even
        assert_eq!(format_time(2.5), "00:02");
        assert_eq!(format_time(3.5), "00:04");
    }

    #[test]
    fn test_range_label() {
        let lines = vec![line(65.0, 70.0), line(71.0, 120.0), line(121.0, 191.0)];
        let range = StageRange::new(0, "导入", 0, 2).unwrap();
        assert_eq!(
            range_label(&lines, &range).unwrap(),
            "01:05 - 03:11，约2.1分钟"
        );
    }

    #[test]
    fn test_missing_stage_is_unrecognized() {
        let lines = vec![line(0.0, 1.0)];
        assert_eq!(stage_label(&lines, &StageRanges::default(), "导入"), UNRECOGNIZED);

        let out_of_bounds = StageRanges::new(vec![StageRange::new(0, "导入", 3, 4).unwrap()]);
        assert_eq!(stage_label(&lines, &out_of_bounds, "导入"), UNRECOGNIZED);
    }
}

use crate::models::{LabeledLine, Turn};

/// Separator placed between lines merged into one turn
pub const TURN_SEPARATOR: char = '，';

/// Merge consecutive same-speaker lines into turns
///
/// Lines whose text is blank after trimming are skipped. Order is preserved
/// and each line is compared only against the last emitted turn.
pub fn merge_turns(labeled: &[LabeledLine]) -> Vec<Turn> {
    let mut turns: Vec<Turn> = Vec::new();

    for line in labeled {
        let text = line.text.trim();
        if text.is_empty() {
            continue;
        }

        match turns.last_mut() {
            Some(last) if last.speaker == line.speaker => {
                last.text.push(TURN_SEPARATOR);
                last.text.push_str(text);
            }
            _ => turns.push(Turn {
                speaker: line.speaker,
                text: text.to_string(),
            }),
        }
    }

    turns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Speaker;

    #[test]
    fn test_merge_adjacent_same_speaker() {
        let labeled = vec![
            LabeledLine::new(Speaker::Teacher, "A"),
            LabeledLine::new(Speaker::Teacher, "B"),
            LabeledLine::new(Speaker::Student, "C"),
        ];
        let turns = merge_turns(&labeled);
        assert_eq!(
            turns,
            vec![
                Turn {
                    speaker: Speaker::Teacher,
                    text: "A，B".to_string()
                },
                Turn {
                    speaker: Speaker::Student,
                    text: "C".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_blank_lines_dropped() {
        let labeled = vec![
            LabeledLine::new(Speaker::Teacher, "A"),
            LabeledLine::new(Speaker::Student, "   "),
            LabeledLine::new(Speaker::Teacher, " B "),
        ];
        let turns = merge_turns(&labeled);
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0].text, "A，B");
    }

    #[test]
    fn test_turns_are_maximal_and_preserve_content() {
        use Speaker::*;
        let pattern = [
            Teacher, Teacher, Student, Class, Class, Teacher, Student, Student, Student, Teacher,
        ];
        let labeled: Vec<LabeledLine> = pattern
            .iter()
            .enumerate()
            .map(|(i, &s)| LabeledLine::new(s, format!("句{}", i)))
            .collect();

        let turns = merge_turns(&labeled);

        assert_eq!(turns.len(), 6);
        for pair in turns.windows(2) {
            assert_ne!(pair[0].speaker, pair[1].speaker);
        }

        let merged: String = turns
            .iter()
            .flat_map(|t| t.text.chars())
            .filter(|&c| c != TURN_SEPARATOR)
            .collect();
        let original: String = labeled.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(merged, original);
    }

    #[test]
    fn test_empty_input() {
        assert!(merge_turns(&[]).is_empty());
    }
}

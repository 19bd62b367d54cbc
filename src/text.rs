use crate::normalize::normalize;

/// Normalized page text held as trimmed, non-empty lines.
#[derive(Debug, Clone, Default)]
pub struct WorkingText {
    lines: Vec<String>,
}

impl WorkingText {
    pub fn from_raw(raw: &str) -> Self {
        let lines = normalize(raw).lines().map(str::to_string).collect();
        WorkingText { lines }
    }

    pub fn char_len(&self) -> usize {
        if self.lines.is_empty() {
            0
        } else {
            // add 1 per newline to keep length realistic
            self.lines.iter().map(|l| l.len() + 1).sum::<usize>().saturating_sub(1)
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// First `max_chars` worth of whole lines, for log samples.
    pub fn sample(&self, max_chars: usize) -> String {
        let mut out = String::new();
        for line in &self.lines {
            if out.len() + line.len() + 1 > max_chars {
                break;
            }
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(line);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_dropped() {
        let t = WorkingText::from_raw("abate\n\n  (v.)  \n");
        assert_eq!(t.lines(), ["abate", "(v.)"]);
        assert_eq!(t.char_len(), 10);
    }

    #[test]
    fn sample_stops_at_line_boundary() {
        let t = WorkingText::from_raw("abate\n(v.) to lessen\n(The storm abated.)");
        assert_eq!(t.sample(12), "abate");
        assert_eq!(t.sample(100).lines().count(), 3);
    }

    #[test]
    fn empty_input() {
        let t = WorkingText::from_raw("   \n\n");
        assert!(t.is_empty());
        assert_eq!(t.char_len(), 0);
    }
}

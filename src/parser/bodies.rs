use super::lines::Line;

/// The lines between one headword and the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryBody {
    pub word: String,
    pub lines: Vec<String>,
    /// Line index of the headword.
    pub first_line: usize,
    /// Line index of the last line belonging to this entry.
    pub last_line: usize,
}

impl EntryBody {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Group classified lines into entry bodies. Lines before the first headword
/// belong to no entry and are dropped, as are noise lines.
pub fn cluster_bodies(lines: &[Line]) -> Vec<EntryBody> {
    let mut bodies: Vec<EntryBody> = Vec::new();
    let mut current: Option<EntryBody> = None;

    for (idx, line) in lines.iter().enumerate() {
        match line {
            Line::Marker(word) => {
                if let Some(done) = current.take() {
                    bodies.push(done);
                }
                current = Some(EntryBody {
                    word: word.clone(),
                    lines: Vec::new(),
                    first_line: idx,
                    last_line: idx,
                });
            }
            Line::Body(text) => {
                if let Some(body) = current.as_mut() {
                    body.lines.push(text.clone());
                    body.last_line = idx;
                }
            }
            Line::Noise => {}
        }
    }

    if let Some(done) = current {
        bodies.push(done);
    }
    bodies
}

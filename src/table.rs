//! Cell grids for the probability tables shown next to the dice.
//!
//! Tables are plain data: faces are real [`DieFace`]s, everything else is text for whatever
//! typesetter ends up drawing it.
use crate::dieface::{die_faces, DieFace, DieFaceStyle};
use crate::palette::RED_B;
use crate::probability::FACES;
use error_stack::{Report, Result, ResultExt};
use error_stack_derive::ErrorStack;

pub const FACE_HEADER: &str = "f";
pub const PROBABILITY_HEADER: &str = r"\mathbb{P}(D=d)";
pub const JOINT_CORNER: &str = r"$d_1$\textbackslash $d_2$";

#[derive(Debug, ErrorStack)]
#[error_message("Failed to build a probability table")]
pub enum TableError {
    Face,
    LabelCountMismatch,
    Shape,
}

/// Where a table's probability labels come from.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbabilityLabelSource {
    /// The same text under every face.
    Literal(String),
    /// One label per face, in face order.
    Precomputed(Vec<String>),
}

impl ProbabilityLabelSource {
    pub fn resolve(&self, count: usize) -> Result<Vec<String>, TableError> {
        match self {
            Self::Literal(text) => Ok(vec![text.clone(); count]),
            Self::Precomputed(labels) if labels.len() == count => Ok(labels.clone()),
            Self::Precomputed(labels) => Err(Report::new(TableError::LabelCountMismatch))
                .attach_printable_lazy(|| format!("Got {} labels for {} faces", labels.len(), count)),
        }
    }
}

impl Default for ProbabilityLabelSource {
    fn default() -> Self {
        Self::Literal(r"\frac{1}{6}".to_owned())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableCell {
    Face(DieFace),
    Probability(String),
    Header(String),
}

impl TableCell {
    fn header(text: &str) -> Self {
        Self::Header(text.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTableOptions {
    pub values: Vec<i32>,
    /// One row per face instead of one row of faces.
    pub transpose: bool,
    /// Probabilities before faces. The "f" and probability headers move with their rows,
    /// and in a transposed table the header row is reversed with the body; the original
    /// layout kept "f" first in either case.
    pub flip: bool,
    pub labels: bool,
    pub style: DieFaceStyle,
}

impl Default for ProbabilityTableOptions {
    fn default() -> Self {
        Self {
            values: (1..=6).collect(),
            transpose: false,
            flip: false,
            labels: true,
            style: DieFaceStyle::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTable {
    rows: Vec<Vec<TableCell>>,
}

impl ProbabilityTable {
    pub fn build(source: &ProbabilityLabelSource, options: &ProbabilityTableOptions) -> Result<Self, TableError> {
        let faces = die_faces(options.values.iter().copied(), options.style)
            .change_context(TableError::Face)?;
        let probabilities = source.resolve(faces.len())?;

        let face_cells = faces.into_iter().map(TableCell::Face);
        let probability_cells = probabilities.into_iter().map(TableCell::Probability);

        let rows = if options.transpose {
            let mut header = vec![TableCell::header(FACE_HEADER), TableCell::header(PROBABILITY_HEADER)];
            let mut body = face_cells
                .zip(probability_cells)
                .map(|(face, p)| vec![face, p])
                .collect::<Vec<_>>();
            if options.flip {
                header.reverse();
                body.iter_mut().for_each(|row| row.reverse());
            }
            if options.labels {
                body.insert(0, header);
            }
            body
        } else {
            let mut face_row = face_cells.collect::<Vec<_>>();
            let mut probability_row = probability_cells.collect::<Vec<_>>();
            if options.labels {
                face_row.insert(0, TableCell::header(FACE_HEADER));
                probability_row.insert(0, TableCell::header(PROBABILITY_HEADER));
            }
            if options.flip {
                vec![probability_row, face_row]
            } else {
                vec![face_row, probability_row]
            }
        };
        Ok(Self { rows })
    }
    pub fn rows(&self) -> &[Vec<TableCell>] {
        &self.rows
    }
    /// (rows, columns)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows.len(), self.rows.first().map_or(0, Vec::len))
    }
}

/// A 7x7 grid: a corner header, faces down the side and across the top, and 6x6 entries.
#[derive(Debug, Clone, PartialEq)]
pub struct JointTable {
    rows: Vec<Vec<TableCell>>,
}

impl JointTable {
    pub fn build(
        entries: Vec<Vec<String>>,
        row_style: DieFaceStyle,
        col_style: DieFaceStyle,
    ) -> Result<Self, TableError> {
        if entries.len() != FACES || entries.iter().any(|row| row.len() != FACES) {
            return Err(Report::new(TableError::Shape)).attach_printable_lazy(|| {
                format!(
                    "Expected {FACES}x{FACES} entries, got rows of lengths {:?}",
                    entries.iter().map(Vec::len).collect::<Vec<_>>()
                )
            });
        }
        let row_labels = die_faces(1..=FACES as i32, row_style).change_context(TableError::Face)?;
        let col_labels = die_faces(1..=FACES as i32, col_style).change_context(TableError::Face)?;

        let header = std::iter::once(TableCell::header(JOINT_CORNER))
            .chain(col_labels.into_iter().map(TableCell::Face))
            .collect::<Vec<_>>();
        let body = row_labels.into_iter().zip(entries).map(|(label, row)| {
            std::iter::once(TableCell::Face(label))
                .chain(row.into_iter().map(TableCell::Probability))
                .collect::<Vec<_>>()
        });
        Ok(Self {
            rows: std::iter::once(header).chain(body).collect(),
        })
    }
    /// Two fair dice: every entry is 1/36.
    pub fn fair(style: DieFaceStyle) -> Result<Self, TableError> {
        Self::build(
            vec![vec![r"\frac{1}{36}".to_owned(); FACES]; FACES],
            style,
            DieFaceStyle {
                dot_color: RED_B,
                ..style
            },
        )
    }
    /// Every entry is the product of two unknown marginals, `p_i \times p'_j`.
    pub fn symbolic(style: DieFaceStyle) -> Result<Self, TableError> {
        let entries = (1..=FACES)
            .map(|i| (1..=FACES).map(|j| format!(r"p_{i} \times p'_{j}")).collect())
            .collect();
        Self::build(
            entries,
            style,
            DieFaceStyle {
                dot_color: RED_B,
                ..style
            },
        )
    }
    pub fn rows(&self) -> &[Vec<TableCell>] {
        &self.rows
    }
    /// The 6x6 body without the labels.
    pub fn entries(&self) -> impl Iterator<Item = &TableCell> {
        self.rows.iter().skip(1).flat_map(|row| row.iter().skip(1))
    }
}

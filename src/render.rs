//! Frame layout and color rules for the quote board
//!
//! A refresh cycle turns the store contents into a [`BoardFrame`]: a list of
//! rows, each made of colored text segments. [`BoardWidget`] writes a frame
//! into a ratatui [`Buffer`] one cell run at a time.
//!
//! ```text
//! row 0    Dow(… … …%)  S&P500(… … …%)  NASDAQ(… … …%)
//! row 1    Name        Last  Change Percent    Open  52w Hi ...
//! row 2..  one line per ranked tracked instrument
//! ```

use crate::{
    constants::{COLOR_ATTRIBUTE, COLOR_THRESHOLD, VOLUME_DIVISOR},
    types::{Attribute, AttributeValue, Instrument},
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Semantic color of a run of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
    /// Summary labels and the column header
    Info,
}

/// Colors for each tone
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub positive: Color,
    pub negative: Color,
    pub neutral: Color,
    pub info: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            positive: Color::Green,
            negative: Color::Red,
            neutral: Color::Yellow,
            info: Color::Yellow,
        }
    }
}

impl Palette {
    pub fn style(&self, tone: Tone) -> Style {
        let fg = match tone {
            Tone::Positive => self.positive,
            Tone::Negative => self.negative,
            Tone::Neutral => self.neutral,
            Tone::Info => self.info,
        };
        Style::default().fg(fg)
    }
}

/// Row color for a table row: strictly past the threshold in either direction
/// is tinted, everything in `[-threshold, threshold]` is neutral.
pub fn row_tone(value: f64, threshold: f64) -> Tone {
    if value > threshold {
        Tone::Positive
    } else if value < -threshold {
        Tone::Negative
    } else {
        Tone::Neutral
    }
}

/// Color of an exchange on the summary line. Zero counts as negative.
pub fn exchange_tone(change_percent: f64) -> Tone {
    if change_percent > 0.0 {
        Tone::Positive
    } else {
        Tone::Negative
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Layout of one table column
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub title: &'static str,
    pub attribute: Attribute,
    /// Width of the value, not counting the suffix
    pub width: usize,
    pub align: Align,
    pub precision: usize,
    pub suffix: &'static str,
    /// Numbers are shown divided by this
    pub divisor: f64,
}

impl ColumnSpec {
    const fn number(title: &'static str, attribute: Attribute) -> Self {
        Self {
            title,
            attribute,
            width: 8,
            align: Align::Right,
            precision: 2,
            suffix: "",
            divisor: 1.0,
        }
    }

    const fn scaled(self, divisor: f64) -> Self {
        Self { divisor, ..self }
    }

    /// Total printed width including the suffix
    pub fn total_width(&self) -> usize {
        self.width + self.suffix.len()
    }

    /// Formats the column title padded to the column width
    pub fn header(&self) -> String {
        pad(self.title, self.total_width(), self.align)
    }

    /// Formats this column's cell for an instrument
    pub fn cell(&self, instrument: &Instrument) -> String {
        match self.attribute.value(instrument) {
            AttributeValue::Text(text) => {
                let text: String = text.chars().take(self.width).collect();
                format!("{}{}", pad(&text, self.width, self.align), self.suffix)
            }
            AttributeValue::Number(n) => {
                let formatted = format!("{:.*}", self.precision, n / self.divisor);
                format!("{}{}", pad(&formatted, self.width, self.align), self.suffix)
            }
        }
    }
}

fn pad(text: &str, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{:<width$}", text),
        Align::Right => format!("{:>width$}", text),
    }
}

/// Table columns, left to right
pub const COLUMNS: &[ColumnSpec] = &[
    ColumnSpec {
        title: "Name",
        attribute: Attribute::Ticker,
        width: 8,
        align: Align::Left,
        precision: 0,
        suffix: "",
        divisor: 1.0,
    },
    ColumnSpec::number("Last", Attribute::Last),
    ColumnSpec::number("Change", Attribute::Change),
    ColumnSpec {
        title: "Percent",
        attribute: Attribute::ChangePercent,
        width: 7,
        align: Align::Right,
        precision: 2,
        suffix: "%",
        divisor: 1.0,
    },
    ColumnSpec::number("Open", Attribute::Open),
    ColumnSpec::number("52w Hi", Attribute::High52),
    ColumnSpec::number("52w Lo", Attribute::Low52),
    ColumnSpec::number("EPS", Attribute::Eps),
    ColumnSpec::number("PE", Attribute::Pe),
    ColumnSpec::number("Volume", Attribute::Volume).scaled(VOLUME_DIVISOR),
    ColumnSpec::number("VolumeA", Attribute::AvgVolume).scaled(VOLUME_DIVISOR),
];

/// A run of text drawn in one color
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub text: String,
    pub tone: Tone,
}

impl Segment {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

/// One line of the board
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameRow {
    pub segments: Vec<Segment>,
}

impl FrameRow {
    pub fn single(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            segments: vec![Segment::new(text, tone)],
        }
    }

    /// Plain text of the row
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

/// Summary line: `<label>(<last> <change> <percent>%)` per exchange
///
/// Labels are drawn in the info color; the figures are green when the index
/// is up and red otherwise.
pub fn exchange_summary(exchanges: &[Instrument]) -> FrameRow {
    let mut row = FrameRow::default();
    for exchange in exchanges {
        let s = exchange.snapshot();
        row.segments.push(Segment::new(exchange.label.clone(), Tone::Info));
        row.segments.push(Segment::new(
            format!("({:.2} {:.2} {:.2}%)", s.last, s.change, s.change_percent),
            exchange_tone(s.change_percent),
        ));
        row.segments.push(Segment::new("  ", Tone::Info));
    }
    row
}

/// Column header line
pub fn header_row() -> FrameRow {
    let text: String = COLUMNS.iter().map(ColumnSpec::header).collect();
    FrameRow::single(text, Tone::Info)
}

/// Table line for one tracked instrument, colored by the configured attribute
pub fn instrument_row(instrument: &Instrument) -> FrameRow {
    let text: String = COLUMNS.iter().map(|c| c.cell(instrument)).collect();
    let tone = row_tone(instrument.number(COLOR_ATTRIBUTE), COLOR_THRESHOLD);
    FrameRow::single(text, tone)
}

/// A complete board, ready to be presented
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardFrame {
    pub rows: Vec<FrameRow>,
}

impl BoardFrame {
    /// Lays out the summary line, the header and one row per ranked instrument
    pub fn build(summary: FrameRow, ranked: &[Instrument]) -> Self {
        let mut rows = Vec::with_capacity(ranked.len() + 2);
        rows.push(summary);
        rows.push(header_row());
        rows.extend(ranked.iter().map(instrument_row));
        Self { rows }
    }
}

/// Draws a [`BoardFrame`] into a buffer, truncating rows at the area edge
pub struct BoardWidget<'a> {
    frame: &'a BoardFrame,
    palette: Palette,
}

impl<'a> BoardWidget<'a> {
    pub fn new(frame: &'a BoardFrame) -> Self {
        Self {
            frame,
            palette: Palette::default(),
        }
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for (row, y) in self.frame.rows.iter().zip(area.top()..area.bottom()) {
            let mut x = area.left();
            for segment in &row.segments {
                if x >= area.right() {
                    break;
                }
                let max_width = (area.right() - x) as usize;
                let (next_x, _) = buf.set_stringn(
                    x,
                    y,
                    &segment.text,
                    max_width,
                    self.palette.style(segment.tone),
                );
                x = next_x;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Snapshot;

    fn instrument(ticker: &str, snapshot: Snapshot) -> Instrument {
        let mut inst = Instrument::new(ticker);
        inst.apply(snapshot);
        inst
    }

    #[test]
    fn test_row_tone_threshold_is_exclusive() {
        assert_eq!(row_tone(0.6, 0.5), Tone::Positive);
        assert_eq!(row_tone(0.5, 0.5), Tone::Neutral);
        assert_eq!(row_tone(0.0, 0.5), Tone::Neutral);
        assert_eq!(row_tone(-0.5, 0.5), Tone::Neutral);
        assert_eq!(row_tone(-0.51, 0.5), Tone::Negative);
    }

    #[test]
    fn test_exchange_tone_zero_is_negative() {
        assert_eq!(exchange_tone(0.01), Tone::Positive);
        assert_eq!(exchange_tone(0.0), Tone::Negative);
        assert_eq!(exchange_tone(-1.0), Tone::Negative);
    }

    #[test]
    fn test_header_row() {
        assert_eq!(
            header_row().text(),
            "Name        Last  Change Percent    Open  52w Hi  52w Lo     EPS      PE  Volume VolumeA"
        );
    }

    #[test]
    fn test_instrument_row_formatting() {
        let inst = instrument(
            "GOOGL",
            Snapshot {
                last: 1021.5,
                change: 10.25,
                change_percent: 1.013,
                open: 1012.0,
                high_52: 1100.0,
                low_52: 800.0,
                eps: 32.5,
                pe: 31.43,
                volume: 1_250_000.0,
                avg_volume: 2_000_000.0,
                ..Default::default()
            },
        );
        let row = instrument_row(&inst);
        assert_eq!(
            row.text(),
            "GOOGL    1021.50   10.25   1.01% 1012.00 1100.00  800.00   32.50   31.43   12.50   20.00"
        );
        assert_eq!(row.segments[0].tone, Tone::Positive);
        assert_eq!(row.text().len(), header_row().text().len());
    }

    #[test]
    fn test_invalid_instrument_row_shows_zeros() {
        let row = instrument_row(&Instrument::new("IBM"));
        assert!(row.text().starts_with("IBM         0.00    0.00   0.00%"));
        assert_eq!(row.segments[0].tone, Tone::Neutral);
    }

    #[test]
    fn test_exchange_summary() {
        let mut dow = Instrument::with_label("Dow", ".DJI");
        dow.apply(Snapshot {
            last: 24000.0,
            change: -120.5,
            change_percent: -0.5,
            ..Default::default()
        });
        let nasdaq = Instrument::with_label("NASDAQ", ".IXIC");

        let row = exchange_summary(&[dow, nasdaq]);
        assert_eq!(row.text(), "Dow(24000.00 -120.50 -0.50%)  NASDAQ(0.00 0.00 0.00%)  ");
        assert_eq!(row.segments[0].tone, Tone::Info);
        assert_eq!(row.segments[1].tone, Tone::Negative);
        assert_eq!(row.segments[4].tone, Tone::Negative);
    }

    #[test]
    fn test_widget_writes_cells_and_truncates() {
        let frame = BoardFrame::build(
            FrameRow::single("summary line", Tone::Info),
            &[instrument(
                "EA",
                Snapshot {
                    change_percent: -2.0,
                    ..Default::default()
                },
            )],
        );
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        BoardWidget::new(&frame).render(area, &mut buf);

        let line = |y: u16| -> String { (0..10).map(|x| buf[(x, y)].symbol().to_string()).collect() };
        assert_eq!(line(0), "summary li");
        assert_eq!(line(1), "Name      ");
        assert_eq!(line(2), "EA        ");
        assert_eq!(buf[(0, 2)].fg, Color::Red);
        assert_eq!(buf[(0, 0)].fg, Color::Yellow);
        assert_eq!(line(3), "          ");
    }
}

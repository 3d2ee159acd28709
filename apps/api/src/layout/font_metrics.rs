//! Static glyph-width tables for the two faces the CV is set in.
//!
//! Widths are the standard AFM advances for the PDF base-14 Helvetica faces, in
//! thousandths of an em. Only ASCII 0x20..=0x7E is tabulated; anything else falls
//! back to `average_width`. Index = (char as usize) - 32.
//!
//! Because the faces are the viewer's built-in fonts, these tables are exact for
//! ASCII text and the greedy wrap below matches what the reader will see.

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

// ────────────────────────────────────────────────────────────────────────────
// Font face enum
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFace {
    Regular,
    Bold,
}

impl FontFace {
    /// The PDF base font name.
    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Metric table
// ────────────────────────────────────────────────────────────────────────────

/// Width slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [u16; 95],
    pub average_width: u16,
}

impl FontMetricTable {
    /// Width of `s` in em units.
    pub fn measure_em(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                let w = if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_width
                };
                f32::from(w) / 1000.0
            })
            .sum()
    }

    /// Width of `s` in millimetres when set at `size_pt`.
    pub fn measure_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_em(s) * size_pt * MM_PER_PT
    }

    /// Greedy word wrap to `max_width_mm`.
    ///
    /// Explicit newlines always break. Runs of whitespace collapse to one space.
    /// A word wider than the line is broken between characters. Blank input
    /// yields no lines.
    pub fn wrap(&self, text: &str, size_pt: f32, max_width_mm: f32) -> Vec<String> {
        let space = self.measure_mm(" ", size_pt);
        let mut lines = Vec::new();

        for paragraph in text.lines() {
            let mut current = String::new();
            let mut current_width = 0.0_f32;

            for word in paragraph.split_whitespace() {
                let word_w = self.measure_mm(word, size_pt);

                if word_w > max_width_mm {
                    if !current.is_empty() {
                        lines.push(std::mem::take(&mut current));
                    }
                    let mut pieces = self.break_word(word, size_pt, max_width_mm);
                    // The last piece keeps accepting words.
                    let tail = pieces.pop().unwrap_or_default();
                    lines.extend(pieces);
                    current_width = self.measure_mm(&tail, size_pt);
                    current = tail;
                    continue;
                }

                if current.is_empty() {
                    current.push_str(word);
                    current_width = word_w;
                } else if current_width + space + word_w > max_width_mm {
                    lines.push(std::mem::replace(&mut current, word.to_string()));
                    current_width = word_w;
                } else {
                    current.push(' ');
                    current.push_str(word);
                    current_width += space + word_w;
                }
            }

            if !current.is_empty() {
                lines.push(current);
            }
        }
        lines
    }

    fn break_word(&self, word: &str, size_pt: f32, max_width_mm: f32) -> Vec<String> {
        let mut pieces = Vec::new();
        let mut piece = String::new();
        for c in word.chars() {
            let mut candidate = piece.clone();
            candidate.push(c);
            if !piece.is_empty() && self.measure_mm(&candidate, size_pt) > max_width_mm {
                pieces.push(std::mem::take(&mut piece));
                piece.push(c);
            } else {
                piece = candidate;
            }
        }
        if !piece.is_empty() {
            pieces.push(piece);
        }
        pieces
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~
        334, 260, 334, 584,
    ],
    average_width: 556,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {    |    }    ~
        389, 280, 389, 584,
    ],
    average_width: 611,
};

pub fn get_metrics(face: FontFace) -> &'static FontMetricTable {
    match face {
        FontFace::Regular => &HELVETICA_TABLE,
        FontFace::Bold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure_empty_returns_zero() {
        assert_eq!(get_metrics(FontFace::Regular).measure_em(""), 0.0);
    }

    #[test]
    fn test_measure_ascii_characters() {
        // "Rust" = R(722) + u(556) + s(500) + t(278) = 2056
        let width = get_metrics(FontFace::Regular).measure_em("Rust");
        assert!((width - 2.056).abs() < 1e-4, "got {width}");
    }

    #[test]
    fn test_non_ascii_falls_back_to_average() {
        let metrics = get_metrics(FontFace::Regular);
        let width = metrics.measure_em("é");
        assert!((width - 0.556).abs() < 1e-4);
    }

    #[test]
    fn test_bold_is_wider_than_regular() {
        let text = "Senior Frontend Developer";
        assert!(
            get_metrics(FontFace::Bold).measure_mm(text, 10.0)
                > get_metrics(FontFace::Regular).measure_mm(text, 10.0)
        );
    }

    #[test]
    fn test_measure_mm_scales_with_size() {
        let m = get_metrics(FontFace::Regular);
        let small = m.measure_mm("abc", 10.0);
        let large = m.measure_mm("abc", 20.0);
        assert!((large - 2.0 * small).abs() < 1e-4);
    }

    #[test]
    fn test_wrap_blank_is_empty() {
        let m = get_metrics(FontFace::Regular);
        assert!(m.wrap("", 10.0, 170.0).is_empty());
        assert!(m.wrap("   \n  ", 10.0, 170.0).is_empty());
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        let m = get_metrics(FontFace::Regular);
        assert_eq!(m.wrap("Led a  team", 10.0, 170.0), vec!["Led a team"]);
    }

    #[test]
    fn test_wrap_lines_fit_width() {
        let m = get_metrics(FontFace::Regular);
        let text = "Architected a distributed caching layer using Redis and consistent hashing, \
                    reducing p99 latency by 40% under 50k RPS peak load. "
            .repeat(4);
        let lines = m.wrap(&text, 10.0, 170.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(m.measure_mm(line, 10.0) <= 170.0, "line too wide: {line}");
        }
        // No words lost.
        let rejoined = lines.join(" ");
        assert_eq!(
            rejoined.split_whitespace().count(),
            text.split_whitespace().count()
        );
    }

    #[test]
    fn test_wrap_respects_newlines() {
        let m = get_metrics(FontFace::Regular);
        assert_eq!(m.wrap("one\ntwo", 10.0, 170.0), vec!["one", "two"]);
    }

    #[test]
    fn test_wrap_breaks_overlong_word() {
        let m = get_metrics(FontFace::Regular);
        let word = "x".repeat(400);
        let lines = m.wrap(&word, 10.0, 50.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
        for line in &lines {
            assert!(m.measure_mm(line, 10.0) <= 50.0);
        }
    }
}

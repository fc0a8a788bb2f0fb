//! Presentation helpers derived from article metadata.

use serde::Serialize;

use crate::Lang;
use crate::text::nfc;

/// Characters of article text read per minute.
const CHARS_PER_MINUTE: u64 = 1500;

/// Estimated reading time in whole minutes, never less than one.
pub fn reading_minutes(length: u64) -> u64 {
    length.div_ceil(CHARS_PER_MINUTE).max(1)
}

/// Coarse difficulty bucket for a free-text difficulty label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn classify(label: &str) -> Self {
        if label.contains("Cơ bản") || label.contains("Basic") {
            Difficulty::Basic
        } else if ["Nâng cao", "Chuyên sâu", "Advanced"]
            .iter()
            .any(|k| label.contains(k))
        {
            Difficulty::Advanced
        } else {
            Difficulty::Intermediate
        }
    }
}

const GENRE_VI_TO_EN: &[(&str, &str)] = &[
    ("Giáo dục", "Education"),
    ("Hóa học", "Chemistry"),
    ("Khoa học Máy tính", "Computer Science"),
    ("Khác", "Other"),
    ("Kinh tế học", "Economics"),
    ("Lịch sử", "History"),
    ("Monster Box", "Monster Box"),
    ("Phát minh - Công nghệ", "Invention & Technology"),
    ("Quan điểm - Ý tưởng", "Opinions & Ideas"),
    ("Sinh học", "Biology"),
    ("Thiên văn học", "Astronomy"),
    ("Toán học", "Mathematics"),
    ("Triết học - Tôn giáo", "Philosophy & Religion"),
    ("Tâm lý học", "Psychology"),
    ("Văn học - Nghệ Thuật", "Literature & Arts"),
    ("Vật lý", "Physics"),
    ("Xã hội - Văn hóa", "Society & Culture"),
    ("Y học - Sức khỏe", "Medicine & Health"),
    ("Địa lý", "Geography"),
];

/// Genre labels are authored in Vietnamese and looked up in NFC form. Unknown labels pass
/// through unchanged.
pub fn translate_genre(genre: &str, lang: Lang) -> &str {
    if lang == Lang::Vi {
        return genre;
    }
    let label = nfc(genre.trim());
    GENRE_VI_TO_EN
        .iter()
        .find(|&&(vi, _)| vi == label)
        .map_or(genre, |&(_, en)| en)
}

//! User-facing text. The interface is Arabic only.

use std::path::Path;

pub const LOADING: &str = "جاري تحميل النص";
pub const EMPTY_STATE: &str = "اختر السورة ورقم الآية ثم اضغط Enter لعرض النص";
pub const REJECTED: &str = "حدث خطأ في استرجاع النص، يرجى المحاولة مرة أخرى.";
pub const UNREACHABLE: &str = "تعذر الاتصال بالخادم. تأكد من اتصالك بالإنترنت.";
pub const CATALOG_UNAVAILABLE: &str = "تعذر تحميل قائمة السور";
/// Page of the surah downloader that fills `quran/` with chapter files.
pub const DOWNLOAD_TOOL: &str = "download.html";

pub const SECONDARY_PLACEHOLDER: &str = "هذا القسم قيد الإعداد وسيتوفر قريباً.";

pub fn verses_available(count: u16) -> String {
    format!("العدد المتاح: {}", count)
}

pub fn reference_label(chapter_name: &str, verse: u16) -> String {
    format!("سورة {} • الآية {}", chapter_name, verse)
}

pub fn verse_not_in_file(chapter: u16, verse: u16) -> String {
    format!(
        "الآية رقم {} غير موجودة في ملف السورة رقم {}. تحقق من رقم الآية.",
        verse, chapter
    )
}

/// Guidance shown when a chapter file cannot be read. Names the missing file,
/// the downloader page and the folder it writes into.
pub fn chapter_file_missing(path: &Path, download_dir: &Path) -> String {
    format!(
        "تعذر تحميل ملف السورة: {}\nافتح أداة تنزيل السور ({}) لحفظ الملفات في المجلد {} ثم أعد المحاولة.",
        slash_path(path),
        DOWNLOAD_TOOL,
        slash_path(download_dir)
    )
}

fn slash_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

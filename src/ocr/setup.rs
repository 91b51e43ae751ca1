use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::log;

#[cfg(windows)]
const TESSERACT_EXE: &str = "tesseract.exe";
#[cfg(not(windows))]
const TESSERACT_EXE: &str = "tesseract";

#[cfg(windows)]
const COMMON_INSTALL_DIRS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR",
    r"C:\Program Files (x86)\Tesseract-OCR",
];
#[cfg(not(windows))]
const COMMON_INSTALL_DIRS: &[&str] = &["/usr/local/bin", "/usr/bin", "/opt/homebrew/bin"];

#[cfg(windows)]
const SYSTEM_TESSDATA_DIRS: &[&str] = &[
    r"C:\Program Files\Tesseract-OCR\tessdata",
    r"C:\Program Files (x86)\Tesseract-OCR\tessdata",
];
#[cfg(not(windows))]
const SYSTEM_TESSDATA_DIRS: &[&str] = &[
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4.00/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    "/opt/homebrew/share/tessdata",
];

/// Returns the per-user directory for a private Tesseract copy
pub fn get_user_tesseract_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("platina-archive")
        .join("tesseract")
}

/// Candidate directories holding a private Tesseract, bundled copy first.
fn private_tesseract_dirs() -> [PathBuf; 2] {
    [crate::paths::get_bundled_tesseract_dir(), get_user_tesseract_dir()]
}

/// Finds the Tesseract executable, checking our local dirs first, then system
pub fn find_tesseract_executable() -> Result<PathBuf> {
    for dir in private_tesseract_dirs() {
        let local_exe = dir.join(TESSERACT_EXE);
        if local_exe.exists() {
            return Ok(local_exe);
        }
    }

    // Check PATH
    if let Ok(output) = Command::new("tesseract").arg("--version").output() {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    // Check common paths
    for dir in COMMON_INSTALL_DIRS {
        let p = Path::new(dir).join(TESSERACT_EXE);
        if p.exists() {
            log(&format!("Found Tesseract at: {}", p.display()));
            return Ok(p);
        }
    }

    Err(anyhow!(
        "Tesseract not found. Install Tesseract-OCR, add it to PATH, or copy it to: {}",
        crate::paths::get_bundled_tesseract_dir().display()
    ))
}

/// Finds a tessdata directory containing `<language>.traineddata`
pub fn find_tessdata_dir(language: &str) -> Result<PathBuf> {
    let traineddata = format!("{}.traineddata", language);
    let has_language = |dir: &Path| dir.join(&traineddata).exists();

    for dir in private_tesseract_dirs() {
        let local_tessdata = dir.join("tessdata");
        if has_language(&local_tessdata) {
            return Ok(local_tessdata);
        }
    }

    // Check TESSDATA_PREFIX environment variable
    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let p = PathBuf::from(&prefix);
        if has_language(&p) {
            return Ok(p);
        }
        let p = p.join("tessdata");
        if has_language(&p) {
            return Ok(p);
        }
    }

    // Check system paths
    for dir in SYSTEM_TESSDATA_DIRS {
        let p = PathBuf::from(dir);
        if has_language(&p) {
            return Ok(p);
        }
    }

    Err(anyhow!(
        "tessdata directory not found. Please ensure {} is available.",
        traineddata
    ))
}

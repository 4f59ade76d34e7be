use crate::{Error, classifier::Prediction};

pub const NON_IMAGE_PROMPT: &str = "📷 กรุณาส่งรูปภาพใบหน้าของคุณ เพื่อให้ระบบประเมินค่าดัชนีมวลกาย (BMI)";

pub const TIMEOUT_REPLY: &str = "⏳ ระบบใช้เวลาประมวลผลนานเกินไป กรุณาลองส่งรูปภาพใหม่อีกครั้งในภายหลัง";

pub const FAILURE_REPLY: &str = "ไม่สามารถประมวลผลภาพได้ในขณะนี้ กรุณาลองใหม่อีกครั้ง";

pub const UNEVALUABLE_REPLY: &str = "ไม่สามารถประเมินภาพนี้ได้ กรุณาส่งรูปภาพใบหน้าที่ชัดเจน";

pub const DISCLAIMER: &str = "ℹ️ ผลนี้เป็นการประเมินจากภาพใบหน้าเท่านั้น ไม่สามารถใช้แทนการชั่งน้ำหนักและวัดส่วนสูงจริงได้";

const UNKNOWN_CONFIDENCE: &str = "ไม่ทราบ";

/// Renders a 0..1 confidence as a percentage with one decimal place.
pub fn format_confidence(confidence: Option<f64>) -> String {
    match confidence {
        Some(value) if value.is_finite() => format!("{:.1}", value * 100.0),
        _ => UNKNOWN_CONFIDENCE.to_string(),
    }
}

/// Turns a classifier answer into the single reply text.
pub fn compose(prediction: &Prediction) -> String {
    if !prediction.ok {
        return provided_or(prediction, UNEVALUABLE_REPLY);
    }

    let Some(status) = prediction.status() else {
        return provided_or(prediction, UNEVALUABLE_REPLY);
    };

    let mut lines = vec!["📊 ผลการประเมินดัชนีมวลกาย (BMI)".to_string()];
    if let Some(bmi) = prediction.bmi {
        lines.push(format!("ค่า BMI โดยประมาณ: {:.1}", bmi));
    } else {
        lines.push(format!("ค่า BMI ของคุณอยู่ในช่วง {}", status.range()));
    }
    lines.push(format!("จัดอยู่ในเกณฑ์ {}", status.label()));
    lines.push(status.advice().to_string());

    format!(
        "{}\n\n🔍 ความมั่นใจของโมเดล: {}%\n{}",
        lines.join("\n"),
        format_confidence(prediction.confidence),
        DISCLAIMER
    )
}

/// Fallback text for a failed fetch, classification or decode.
pub fn fallback(err: &Error) -> &'static str {
    if err.is_timeout() {
        TIMEOUT_REPLY
    } else {
        FAILURE_REPLY
    }
}

fn provided_or(prediction: &Prediction, default: &str) -> String {
    prediction
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(default)
        .to_string()
}

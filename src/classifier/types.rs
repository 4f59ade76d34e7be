use serde::Deserialize;

/// Response from the classifier's predict endpoint.
///
/// `ok` defaults to true so a bare `{ "class": ..., "confidence": ... }` body
/// is treated as a successful prediction. When both `bmi` and a class label
/// are present the numeric BMI decides the status; `class` wins over
/// `class_name`.
#[derive(Debug, Clone, Deserialize)]
pub struct Prediction {
    #[serde(default = "default_ok")]
    pub ok: bool,
    #[serde(default, rename = "class")]
    pub label: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub bmi: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_ok() -> bool {
    true
}

impl Prediction {
    pub fn status(&self) -> Option<BodyStatus> {
        if let Some(bmi) = self.bmi {
            return BodyStatus::from_bmi(bmi);
        }
        self.class_label().and_then(BodyStatus::from_label)
    }

    pub fn class_label(&self) -> Option<&str> {
        self.label.as_deref().or(self.class_name.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStatus {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BodyStatus {
    /// Asian-Pacific BMI bands, lower bound inclusive.
    pub fn from_bmi(bmi: f64) -> Option<Self> {
        if !bmi.is_finite() {
            return None;
        }
        let status = if bmi < 18.5 {
            Self::Underweight
        } else if bmi < 23.0 {
            Self::Normal
        } else if bmi < 25.0 {
            Self::Overweight
        } else {
            Self::Obese
        };
        Some(status)
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "under" | "underweight" => Some(Self::Underweight),
            "normal" | "class1" => Some(Self::Normal),
            "over" | "overweight" | "class2" => Some(Self::Overweight),
            "obese" | "obesity" | "class3" => Some(Self::Obese),
            _ => None,
        }
    }

    /// Localized category name shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "น้ำหนักต่ำกว่าเกณฑ์",
            Self::Normal => "น้ำหนักปกติ",
            Self::Overweight => "น้ำหนักเกิน",
            Self::Obese => "โรคอ้วน",
        }
    }

    pub fn range(&self) -> &'static str {
        match self {
            Self::Underweight => "ต่ำกว่า 18.5",
            Self::Normal => "18.5 – 22.9",
            Self::Overweight => "23.0 – 24.9",
            Self::Obese => "25.0 ขึ้นไป",
        }
    }

    pub fn advice(&self) -> &'static str {
        match self {
            Self::Underweight => {
                "🥺 ควรรับประทานอาหารให้ครบ 5 หมู่และเพิ่มพลังงานอย่างเหมาะสม"
            }
            Self::Normal => {
                "✅ ร่างกายมีความสมดุล แนะนำให้รักษาพฤติกรรมการกินและการออกกำลังกายอย่างสม่ำเสมอ"
            }
            Self::Overweight => {
                "⚠️ เริ่มมีความเสี่ยงต่อปัญหาสุขภาพ แนะนำให้ควบคุมอาหารและเพิ่มกิจกรรมทางกาย"
            }
            Self::Obese => {
                "🚨 มีความเสี่ยงต่อโรคเบาหวานและความดันโลหิตสูง ควรปรึกษาผู้เชี่ยวชาญด้านสุขภาพ"
            }
        }
    }
}

//! Personality keys and the tone instructions they select.

/// Tone of the generated narrative, chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Personality {
    #[default]
    Cheerful,
    Poetic,
    Technical,
    Sarcastic,
    ForChildren,
}

/// Which catalog to read the tone from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToneVariant {
    /// Current weather plus forecast, 40-50 word narrative.
    Extended,
    /// Single forecasted day, 30-40 word narrative.
    Brief,
}

impl Personality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Personality::Cheerful => "cheerful",
            Personality::Poetic => "poetic",
            Personality::Technical => "technical",
            Personality::Sarcastic => "sarcastic",
            Personality::ForChildren => "for-children",
        }
    }

    pub const fn all() -> &'static [Personality] {
        &[
            Personality::Cheerful,
            Personality::Poetic,
            Personality::Technical,
            Personality::Sarcastic,
            Personality::ForChildren,
        ]
    }

    /// Resolve a caller-supplied key. Unknown keys fall back to `Cheerful`.
    ///
    /// The Spanish keys sent by the existing front-end are accepted as aliases.
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_lowercase().as_str() {
            "cheerful" | "alegre" => Personality::Cheerful,
            "poetic" | "poetico" | "poético" => Personality::Poetic,
            "technical" | "tecnico" | "técnico" => Personality::Technical,
            "sarcastic" | "sarcastico" | "sarcástico" => Personality::Sarcastic,
            "for-children" | "for_children" | "para_ninos" | "para_niños" => {
                Personality::ForChildren
            }
            _ => Personality::Cheerful,
        }
    }

    /// Same as [`Personality::from_key`], treating an absent key as `Cheerful`.
    pub fn from_optional(key: Option<&str>) -> Self {
        key.map(Self::from_key).unwrap_or_default()
    }

    pub fn tone(&self, variant: ToneVariant) -> &'static str {
        resolve_tone(*self, variant)
    }
}

impl std::fmt::Display for Personality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn resolve_tone(personality: Personality, variant: ToneVariant) -> &'static str {
    match variant {
        ToneVariant::Extended => match personality {
            Personality::Cheerful => {
                "Usa un tono muy entusiasta y optimista. ¡Haz que el día suene genial!"
            }
            Personality::Poetic => {
                "Describe el tiempo de forma lírica, con metáforas y un lenguaje evocador."
            }
            Personality::Technical => {
                "Sé preciso y educativo. Explica la situación con términos meteorológicos pero de forma comprensible."
            }
            Personality::Sarcastic => {
                "Utiliza un humor irónico y un poco cínico para describir el tiempo. Sé divertido."
            }
            Personality::ForChildren => {
                "Explica el tiempo como si hablaras con un niño de 6 años, con ejemplos sencillos y animados."
            }
        },
        ToneVariant::Brief => match personality {
            Personality::Cheerful => "Usa un tono entusiasta y optimista.",
            Personality::Poetic => "Describe la previsión de forma lírica.",
            Personality::Technical => "Sé preciso y educativo.",
            Personality::Sarcastic => "Utiliza un humor irónico.",
            Personality::ForChildren => "Explica la previsión como si hablaras con un niño.",
        },
    }
}

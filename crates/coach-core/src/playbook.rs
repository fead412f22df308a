//! Playbook Table & Resolver: per-archetype tone, fillers, agent instruction and techniques.
//!
//! Instructions carry tone guidance only (energy, pace, voice, style). Script navigation is
//! owned upstream and never appears here.
//!
//! | Archetype | Energy | Pace | TTS speed | TTS stability |
//! |-----------|--------|------|-----------|---------------|
//! | skeptic | MEDIA | LENTO | 0.95 | 0.7 |
//! | busy | ALTA | VELOCE | 1.3 | 0.5 |
//! | price_focused | MEDIA | MODERATO | 1.0 | 0.6 |
//! | technical | MEDIA | MODERATO | 1.0 | 0.7 |
//! | enthusiast | ALTA | VELOCE | 1.2 | 0.4 |
//! | indecisive | BASSA | LENTO | 0.95 | 0.65 |
//! | defensive | BASSA | LENTO | 0.9 | 0.7 |
//! | analytical | MEDIA | MODERATO | 1.0 | 0.7 |
//! | decision_maker | ALTA | MODERATO | 1.1 | 0.55 |
//! | neutral | MEDIA | MODERATO | 1.05 | 0.55 |

use crate::archetype::Archetype;
use serde::Serialize;

/// Text-to-speech parameters. `speed` 1.0 is normal; lower `stability` means more expressive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TtsParams {
    pub speed: f32,
    pub stability: f32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Playbook {
    pub id: Archetype,
    pub emoji: &'static str,
    pub name: &'static str,
    /// Immediate acknowledgements spoken while deeper analysis runs.
    pub fillers: &'static [&'static str],
    pub tts_params: TtsParams,
    /// Instruction template injected into the upstream agent prompt.
    pub instruction: &'static str,
    pub techniques: &'static [&'static str],
    pub avoid: &'static [&'static str],
    pub mirroring_tips: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoiceEnergy {
    Bassa,
    Media,
    Alta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum VoicePace {
    Lento,
    Moderato,
    Veloce,
}

impl VoiceEnergy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bassa => "BASSA",
            Self::Media => "MEDIA",
            Self::Alta => "ALTA",
        }
    }
}

impl VoicePace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lento => "LENTO",
            Self::Moderato => "MODERATO",
            Self::Veloce => "VELOCE",
        }
    }
}

/// Tone-only guidance for one archetype.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToneProfile {
    pub archetype: Archetype,
    pub emoji: &'static str,
    pub name: &'static str,
    pub voice_energy: VoiceEnergy,
    pub voice_pace: VoicePace,
    pub voice_tone: &'static str,
    pub communication_style: &'static str,
    pub emotional_cue: &'static str,
}

// Both tables are laid out in `Archetype::ALL` order.
const PLAYBOOKS: [Playbook; 10] = [
    Playbook {
        id: Archetype::Skeptic,
        emoji: "🤨",
        name: "Scettico",
        fillers: &["Mmh, capisco...", "Interessante punto...", "Capisco la tua posizione..."],
        tts_params: TtsParams { speed: 0.95, stability: 0.7 },
        instruction: "🎭 TONO: Scettico\n🎤 Energia: MEDIA | Ritmo: LENTO\n🗣️ Voce: Calmo, sicuro, leggermente distaccato\n🪞 Stile: Professionale e non difensivo. Pause più lunghe. Non riempire i silenzi.",
        techniques: &["Negative Reverse Selling", "Frame Control", "Pattern Interrupt"],
        avoid: &["Essere troppo entusiasta", "Difendere il prodotto", "Fare promesse", "Essere insistente"],
        mirroring_tips: "Tono calmo, sicuro, leggermente distaccato. Pause più lunghe. Non riempire i silenzi.",
    },
    Playbook {
        id: Archetype::Busy,
        emoji: "⏰",
        name: "Frettoloso",
        fillers: &["Ok!", "Sì!", "Allora...", "Subito!"],
        tts_params: TtsParams { speed: 1.3, stability: 0.5 },
        instruction: "🎭 TONO: Frettoloso\n🎤 Energia: ALTA | Ritmo: VELOCE\n🗣️ Voce: Diretto, conciso, rispettoso del tempo\n🪞 Stile: Risposte brevi e incisive. Zero convenevoli. Vai al punto.",
        techniques: &["BLUF", "Rispetto del tempo", "Sintesi estrema"],
        avoid: &["Divagare", "Storie lunghe", "Dettagli non richiesti", "Ripetizioni"],
        mirroring_tips: "Parla veloce, tono energico, frasi corte. Vai al punto immediatamente.",
    },
    Playbook {
        id: Archetype::PriceFocused,
        emoji: "💰",
        name: "Focus Prezzo",
        fillers: &["Capisco...", "Certo...", "Giusto..."],
        tts_params: TtsParams { speed: 1.0, stability: 0.6 },
        instruction: "🎭 TONO: Focus Prezzo\n🎤 Energia: MEDIA | Ritmo: MODERATO\n🗣️ Voce: Calmo, razionale, non emotivo\n🪞 Stile: Parla di numeri e valore. Tono business-like.",
        techniques: &["Cost of Inaction", "Value Reframe", "ROI Discussion"],
        avoid: &["Difendere il prezzo", "Offrire sconti subito", "Dire \"è economico\"", "Giustificarsi"],
        mirroring_tips: "Tono calmo e razionale. Non emotivo. Parla di numeri e valore.",
    },
    Playbook {
        id: Archetype::Technical,
        emoji: "🔧",
        name: "Tecnico",
        fillers: &["Ottima domanda...", "Buon punto tecnico...", "Interessante..."],
        tts_params: TtsParams { speed: 1.0, stability: 0.7 },
        instruction: "🎭 TONO: Tecnico\n🎤 Energia: MEDIA | Ritmo: MODERATO\n🗣️ Voce: Professionale, preciso, metodico\n🪞 Stile: Usa terminologia appropriata. Sii strutturato e logico.",
        techniques: &["Technical Depth", "Process Clarity", "Data-driven Arguments"],
        avoid: &["Marketing speak", "Promesse vaghe", "Generalizzazioni", "Evitare domande tecniche"],
        mirroring_tips: "Tono professionale, preciso. Usa terminologia tecnica. Sii metodico.",
    },
    Playbook {
        id: Archetype::Enthusiast,
        emoji: "😊",
        name: "Entusiasta",
        fillers: &["Fantastico!", "Evvai!", "Super interessante!", "Bellissimo!"],
        tts_params: TtsParams { speed: 1.2, stability: 0.4 },
        instruction: "🎭 TONO: Entusiasta\n🎤 Energia: ALTA | Ritmo: VELOCE\n🗣️ Voce: Energico, vivace, entusiasta\n🪞 Stile: Match l'energia positiva. Voce alta, ritmo veloce.",
        techniques: &["Momentum Building", "Assumptive Close", "Enthusiasm Matching"],
        avoid: &["Raffreddare l'entusiasmo", "Troppi dettagli", "Rallentare", "Dubbi non richiesti"],
        mirroring_tips: "Tono energico, vivace! Voce alta, ritmo veloce. Match l'energia positiva.",
    },
    Playbook {
        id: Archetype::Indecisive,
        emoji: "🤔",
        name: "Indeciso",
        fillers: &["Sì, capisco...", "È normale avere dubbi...", "Comprendo..."],
        tts_params: TtsParams { speed: 0.95, stability: 0.65 },
        instruction: "🎭 TONO: Indeciso\n🎤 Energia: BASSA | Ritmo: LENTO\n🗣️ Voce: Rassicurante, calmo, paziente\n🪞 Stile: Dai tempo. Non riempire i silenzi. Sii paziente.",
        techniques: &["Choice Reduction", "Social Proof", "Fear Removal"],
        avoid: &["Pressare", "Troppe opzioni", "Urgenza artificiale", "Forzare decisioni"],
        mirroring_tips: "Tono rassicurante, calmo, paziente. Dai tempo. Non riempire i silenzi.",
    },
    Playbook {
        id: Archetype::Defensive,
        emoji: "🛡️",
        name: "Difensivo",
        fillers: &["Capisco perfettamente...", "Hai ragione a essere cauto...", "Comprendo..."],
        tts_params: TtsParams { speed: 0.9, stability: 0.7 },
        instruction: "🎭 TONO: Difensivo\n🎤 Energia: BASSA | Ritmo: LENTO\n🗣️ Voce: Molto calmo, basso, rassicurante\n🪞 Stile: Movimenti lenti. Zero aggressività. Rispetta i suoi confini.",
        techniques: &["Fear Validation", "Control Giving", "Transparency"],
        avoid: &["Minimizzare paure", "Essere aggressivo", "Promesse eccessive", "Pressione"],
        mirroring_tips: "Tono molto calmo, basso, rassicurante. Movimenti lenti. Zero aggressività.",
    },
    Playbook {
        id: Archetype::Analytical,
        emoji: "📊",
        name: "Analitico",
        fillers: &["Ottima osservazione...", "Buon punto...", "Interessante analisi..."],
        tts_params: TtsParams { speed: 1.0, stability: 0.7 },
        instruction: "🎭 TONO: Analitico\n🎤 Energia: MEDIA | Ritmo: MODERATO\n🗣️ Voce: Razionale, calmo, strutturato\n🪞 Stile: Presenta informazioni in modo logico e ordinato.",
        techniques: &["Data Presentation", "Logical Flow", "Evidence-based Arguments"],
        avoid: &["Opinioni non supportate", "Entusiasmo eccessivo", "Promesse senza dati", "Fretta"],
        mirroring_tips: "Tono razionale, calmo. Presenta informazioni in modo strutturato e logico.",
    },
    Playbook {
        id: Archetype::DecisionMaker,
        emoji: "🎯",
        name: "Decision Maker",
        fillers: &["Assolutamente...", "Certamente...", "Perfetto..."],
        tts_params: TtsParams { speed: 1.1, stability: 0.55 },
        instruction: "🎭 TONO: Decision Maker\n🎤 Energia: ALTA | Ritmo: MODERATO\n🗣️ Voce: Sicuro, autorevole, diretto\n🪞 Stile: Parla da pari a pari. Sii conciso e rispetta il suo ruolo.",
        techniques: &["Strategic Framing", "Competitive Positioning", "Big Picture"],
        avoid: &["Dettagli operativi", "Tecnicismi", "Perdere tempo", "Essere indeciso"],
        mirroring_tips: "Tono sicuro, autorevole. Parla da pari a pari. Sii conciso e diretto.",
    },
    Playbook {
        id: Archetype::Neutral,
        emoji: "😐",
        name: "Neutro",
        fillers: &["Sì...", "Capisco...", "Ok..."],
        tts_params: TtsParams { speed: 1.05, stability: 0.55 },
        instruction: "🎭 TONO: Neutro\n🎤 Energia: MEDIA | Ritmo: MODERATO\n🗣️ Voce: Equilibrato, professionale, adattabile\n🪞 Stile: Tono standard. Osserva e adattati man mano.",
        techniques: &["Active Listening", "Open Questions", "Observation"],
        avoid: &["Assumere un archetipo senza segnali", "Essere robotico"],
        mirroring_tips: "Tono equilibrato, professionale. Adattati man mano che capisci meglio.",
    },
];

const TONE_PROFILES: [ToneProfile; 10] = [
    ToneProfile {
        archetype: Archetype::Skeptic,
        emoji: "🤨",
        name: "Scettico",
        voice_energy: VoiceEnergy::Media,
        voice_pace: VoicePace::Lento,
        voice_tone: "Calmo, sicuro, leggermente distaccato",
        communication_style: "Professionale e non difensivo. Pause più lunghe. Non riempire i silenzi.",
        emotional_cue: "Trasmetti sicurezza tranquilla, non cercare approvazione",
    },
    ToneProfile {
        archetype: Archetype::Busy,
        emoji: "⏰",
        name: "Frettoloso",
        voice_energy: VoiceEnergy::Alta,
        voice_pace: VoicePace::Veloce,
        voice_tone: "Diretto, conciso, rispettoso del tempo",
        communication_style: "Risposte brevi e incisive. Zero convenevoli. Vai al punto.",
        emotional_cue: "Trasmetti efficienza e rispetto per il suo tempo",
    },
    ToneProfile {
        archetype: Archetype::PriceFocused,
        emoji: "💰",
        name: "Focus Prezzo",
        voice_energy: VoiceEnergy::Media,
        voice_pace: VoicePace::Moderato,
        voice_tone: "Calmo, razionale, non emotivo",
        communication_style: "Parla di numeri e valore. Tono business-like.",
        emotional_cue: "Trasmetti competenza e comprensione delle sue priorità economiche",
    },
    ToneProfile {
        archetype: Archetype::Technical,
        emoji: "🔧",
        name: "Tecnico",
        voice_energy: VoiceEnergy::Media,
        voice_pace: VoicePace::Moderato,
        voice_tone: "Professionale, preciso, metodico",
        communication_style: "Usa terminologia appropriata. Sii strutturato e logico.",
        emotional_cue: "Trasmetti competenza tecnica e precisione",
    },
    ToneProfile {
        archetype: Archetype::Enthusiast,
        emoji: "😊",
        name: "Entusiasta",
        voice_energy: VoiceEnergy::Alta,
        voice_pace: VoicePace::Veloce,
        voice_tone: "Energico, vivace, entusiasta",
        communication_style: "Match l'energia positiva. Voce alta, ritmo veloce.",
        emotional_cue: "Trasmetti entusiasmo genuino, condividi la positività",
    },
    ToneProfile {
        archetype: Archetype::Indecisive,
        emoji: "🤔",
        name: "Indeciso",
        voice_energy: VoiceEnergy::Bassa,
        voice_pace: VoicePace::Lento,
        voice_tone: "Rassicurante, calmo, paziente",
        communication_style: "Dai tempo. Non riempire i silenzi. Sii paziente.",
        emotional_cue: "Trasmetti tranquillità e assenza di pressione",
    },
    ToneProfile {
        archetype: Archetype::Defensive,
        emoji: "🛡️",
        name: "Difensivo",
        voice_energy: VoiceEnergy::Bassa,
        voice_pace: VoicePace::Lento,
        voice_tone: "Molto calmo, basso, rassicurante",
        communication_style: "Movimenti lenti. Zero aggressività. Rispetta i suoi confini.",
        emotional_cue: "Trasmetti sicurezza e rispetto, non minaccia",
    },
    ToneProfile {
        archetype: Archetype::Analytical,
        emoji: "📊",
        name: "Analitico",
        voice_energy: VoiceEnergy::Media,
        voice_pace: VoicePace::Moderato,
        voice_tone: "Razionale, calmo, strutturato",
        communication_style: "Presenta informazioni in modo logico e ordinato.",
        emotional_cue: "Trasmetti competenza e approccio basato sui fatti",
    },
    ToneProfile {
        archetype: Archetype::DecisionMaker,
        emoji: "🎯",
        name: "Decision Maker",
        voice_energy: VoiceEnergy::Alta,
        voice_pace: VoicePace::Moderato,
        voice_tone: "Sicuro, autorevole, diretto",
        communication_style: "Parla da pari a pari. Sii conciso e rispetta il suo ruolo.",
        emotional_cue: "Trasmetti autorevolezza e visione strategica",
    },
    ToneProfile {
        archetype: Archetype::Neutral,
        emoji: "😐",
        name: "Neutro",
        voice_energy: VoiceEnergy::Media,
        voice_pace: VoicePace::Moderato,
        voice_tone: "Equilibrato, professionale, adattabile",
        communication_style: "Tono standard. Osserva e adattati man mano.",
        emotional_cue: "Trasmetti professionalità e apertura",
    },
];

/// Read-only lookup over the playbook and tone tables. Every lookup succeeds.
#[derive(Debug)]
pub struct PlaybookTable {
    playbooks: &'static [Playbook; 10],
    tones: &'static [ToneProfile; 10],
}

static BUILTIN: PlaybookTable = PlaybookTable {
    playbooks: &PLAYBOOKS,
    tones: &TONE_PROFILES,
};

impl PlaybookTable {
    pub fn builtin() -> &'static PlaybookTable {
        &BUILTIN
    }

    pub fn resolve(&self, archetype: Archetype) -> &Playbook {
        &self.playbooks[archetype as usize]
    }

    /// Resolves a raw archetype id; anything unknown gets the neutral playbook.
    pub fn resolve_id(&self, id: &str) -> &Playbook {
        self.resolve(Archetype::from_id(id).unwrap_or_default())
    }

    /// Rotates through the archetype's fillers by turn number.
    pub fn filler(&self, archetype: Archetype, turn: usize) -> &'static str {
        let fillers = self.resolve(archetype).fillers;
        fillers[turn % fillers.len()]
    }

    pub fn tts_params(&self, archetype: Archetype) -> TtsParams {
        self.resolve(archetype).tts_params
    }

    pub fn tone_profile(&self, archetype: Archetype) -> &ToneProfile {
        &self.tones[archetype as usize]
    }

    /// Four-line tone-only reminder: tone name, energy and pace, voice, style.
    pub fn tone_reminder(&self, archetype: Archetype) -> String {
        let tone = self.tone_profile(archetype);
        format!(
            "🎭 TONO: {}\n🎤 Energia: {} | Ritmo: {}\n🗣️ Voce: {}\n🪞 Stile: {}",
            tone.name,
            tone.voice_energy.as_str(),
            tone.voice_pace.as_str(),
            tone.voice_tone,
            tone.communication_style
        )
    }

    /// Display tag such as `"💰 FOCUS PREZZO"`.
    pub fn archetype_tag(&self, archetype: Archetype) -> String {
        let playbook = self.resolve(archetype);
        format!("{} {}", playbook.emoji, playbook.name.to_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_in_archetype_order() {
        let table = PlaybookTable::builtin();
        for a in Archetype::ALL {
            assert_eq!(table.resolve(a).id, a);
            assert_eq!(table.tone_profile(a).archetype, a);
            assert!(!table.resolve(a).fillers.is_empty());
        }
    }

    #[test]
    fn unknown_id_falls_back_to_neutral() {
        let table = PlaybookTable::builtin();
        assert_eq!(table.resolve_id("riflessivo").id, Archetype::Neutral);
        assert_eq!(table.resolve_id("").id, Archetype::Neutral);
        assert_eq!(table.resolve_id("busy").id, Archetype::Busy);
    }

    #[test]
    fn tone_reminder_matches_playbook_instruction() {
        let table = PlaybookTable::builtin();
        for a in Archetype::ALL {
            assert_eq!(table.tone_reminder(a), table.resolve(a).instruction, "{}", a);
        }
    }

    #[test]
    fn fillers_rotate_by_turn() {
        let table = PlaybookTable::builtin();
        assert_eq!(table.filler(Archetype::Busy, 0), "Ok!");
        assert_eq!(table.filler(Archetype::Busy, 1), "Sì!");
        assert_eq!(table.filler(Archetype::Busy, 4), "Ok!");
    }

    #[test]
    fn tag_and_tts() {
        let table = PlaybookTable::builtin();
        assert_eq!(table.archetype_tag(Archetype::PriceFocused), "💰 FOCUS PREZZO");
        assert_eq!(table.tts_params(Archetype::Busy), TtsParams { speed: 1.3, stability: 0.5 });
    }
}

//! Built-in detection tables (Italian-language calls).
//!
//! Pure data. Matchers are regex sources compiled case-insensitive by [`super::Matcher`];
//! declaration order is significant for tie-breaks in both the classifier and the detector.

use super::{AntiPatternPriority, AntiPatternSpec, ArchetypePatternSpec};
use crate::archetype::Archetype;

/// Version stamp of the built-in tables. Bump when a matcher, weight or priority changes.
pub const BUILTIN_CATALOG_VERSION: &str = "2025.1";

struct ArchetypeEntry {
    archetype: Archetype,
    weight: f32,
    patterns: &'static [&'static str],
    negations: &'static [&'static str],
}

struct AntiPatternEntry {
    id: &'static str,
    name: &'static str,
    priority: AntiPatternPriority,
    triggers: &'static [&'static str],
    instruction: &'static str,
}

const ARCHETYPE_ENTRIES: &[ArchetypeEntry] = &[
    ArchetypeEntry {
        archetype: Archetype::Skeptic,
        weight: 0.35,
        patterns: &[
            r"ho già provato|già visto|non ha funzionato",
            r"come faccio a fidarmi|perché dovrei crederti|perché dovrei fidarmi",
            r"prove|dimostrami|referenze|case study",
            r"tutti dicono la stessa cosa|solita storia|sempre la stessa",
            r"non mi convince|scettico|dubbioso|difficile crederci",
            // sarcasm
            r"sì,?\s*certo|come no|figuriamoci",
            r"e chi mi garantisce|chi garantisce",
        ],
        negations: &[r"mi hai convinto|sono convinto|mi fido"],
    },
    ArchetypeEntry {
        archetype: Archetype::Busy,
        weight: 0.35,
        patterns: &[
            r"non ho tempo|sono di fretta|velocemente|sbrigati",
            r"vai al punto|in breve|senza giri di parole|al sodo",
            r"ho solo \d+ minuti|devo andare|tra poco ho",
            r"riassumendo|in sintesi|in due parole",
            r"sì sì,?\s*vai avanti|ok ok,?\s*dimmi",
        ],
        negations: &[],
    },
    ArchetypeEntry {
        archetype: Archetype::PriceFocused,
        weight: 0.4,
        patterns: &[
            r"quanto costa|qual è il prezzo|che cifra|che prezzo",
            r"troppo caro|non ho budget|fuori budget|costoso",
            r"sconto|offerta|promozione|prezzo speciale",
            r"la concorrenza costa meno|altri chiedono meno|più economico",
            r"non posso permettermi|non me lo posso permettere",
        ],
        negations: &[
            r"il prezzo non (è un |mi |)problem|non (mi |)interessa il prezzo|i soldi non sono un problema",
            r"non è una questione di prezzo|non parlo di prezzo",
        ],
    },
    ArchetypeEntry {
        archetype: Archetype::Technical,
        weight: 0.35,
        patterns: &[
            r"come funziona tecnicamente|nel dettaglio|specifiche tecniche",
            r"API|integrazione|stack|framework|metodologia|architettura",
            r"KPI|metriche|dati|statistiche|benchmark",
            r"processo|workflow|step operativi|procedura",
            r"sicurezza|uptime|scalabilità|performance",
        ],
        negations: &[],
    },
    ArchetypeEntry {
        archetype: Archetype::Enthusiast,
        weight: 0.3,
        patterns: &[
            r"fantastico|interessante|wow|incredibile|super",
            r"dimmi di più|voglio sapere|sono curioso|raccontami",
            r"mi piace|mi interessa molto|sembra perfetto|adoro",
            r"non vedo l'ora|quando possiamo iniziare",
        ],
        negations: &[],
    },
    ArchetypeEntry {
        archetype: Archetype::Indecisive,
        weight: 0.3,
        patterns: &[
            r"devo pensarci|non sono sicuro|forse|magari",
            r"devo parlare con|chiedere a|consultare|sentire",
            r"e se poi|ma cosa succede se|non so se",
            r"non so se è il momento giusto|più avanti|non ora",
            r"fammi pensare|ci devo riflettere",
        ],
        negations: &[],
    },
    ArchetypeEntry {
        archetype: Archetype::Defensive,
        weight: 0.35,
        patterns: &[
            r"non voglio essere pressato|non mi pressare|niente pressioni",
            r"ultimo fornitore mi ha fregato|brutte esperienze|scottato",
            r"non firmo nulla oggi|non compro nulla oggi",
            r"perché dovrei fidarmi di voi|state cercando di vendermi",
            r"garanzie|clausola di uscita|rimborso",
        ],
        negations: &[],
    },
    ArchetypeEntry {
        archetype: Archetype::Analytical,
        weight: 0.3,
        patterns: &[
            r"dati che supportano|statistiche|numeri reali",
            r"case study dettagliati|metriche misurabili",
            r"ricerche|studi|evidenze|prove scientifiche",
            r"analisi|valutazione oggettiva|criteri",
        ],
        negations: &[],
    },
    ArchetypeEntry {
        archetype: Archetype::DecisionMaker,
        weight: 0.25,
        patterns: &[
            r"sono io che decido|decido io|è una mia decisione",
            r"vantaggio competitivo|strategia|quadro generale",
            r"perché scegliere voi|cosa vi differenzia",
            r"sono l'amministratore|sono il CEO|sono il titolare",
        ],
        negations: &[],
    },
];

const ANTI_PATTERN_ENTRIES: &[AntiPatternEntry] = &[
    AntiPatternEntry {
        id: "repeated_question",
        name: "Domanda Ripetuta",
        priority: AntiPatternPriority::Critical,
        triggers: &[
            r"te l'ho già detto|già risposto|stessa domanda|già spiegato",
            r"stiamo girando in tondo|ripetendo|già detto prima",
            r"continui a chiedere|perché lo chiedi ancora",
        ],
        instruction: "🚨 STOP! Stai ripetendo la stessa domanda. Il prospect è frustrato.\n\
Dì: \"Hai ragione, scusa se mi sono ripetuto. Lasciami riformulare...\"\n\
Poi fai una domanda COMPLETAMENTE DIVERSA o avanza nello script.",
    },
    AntiPatternEntry {
        id: "ignored_request",
        name: "Richiesta Ignorata",
        priority: AntiPatternPriority::Critical,
        triggers: &[
            r"non hai risposto|non mi hai detto|ignori la mia domanda",
            r"sto chiedendo|ti ho chiesto|la mia domanda era",
            r"rispondimi|puoi rispondere|mi ascolti",
        ],
        instruction: "🚨 HAI IGNORATO LA DOMANDA DEL PROSPECT! Fermati.\n\
PRIMA rispondi alla sua domanda (anche brevemente).\n\
POI puoi fare la tua domanda. Mai ignorare richieste dirette.",
    },
    AntiPatternEntry {
        id: "excessive_validation",
        name: "Validazione Eccessiva",
        priority: AntiPatternPriority::High,
        triggers: &[
            r"capire non risolve|basta capire|azioni non parole",
            r"cosa mi proponi|soluzione concreta|passiamo ai fatti",
            r"meno parole più fatti",
        ],
        instruction: "🚨 BASTA VALIDAZIONE! Il prospect vuole azioni, non empatia.\n\
Smetti di dire \"capisco\". Passa a:\n\
\"Ok, lascia che ti faccia una proposta concreta...\" e proponi il prossimo step.",
    },
    AntiPatternEntry {
        id: "losing_prospect",
        name: "Prospect in Fuga",
        priority: AntiPatternPriority::High,
        triggers: &[
            r"devo andare|chiudiamo qui|non ho più tempo",
            r"ci sentiamo dopo|ti richiamo|fatti risentire",
            r"ok basta|è sufficiente|ho capito",
        ],
        instruction: "⚠️ ATTENZIONE: Il prospect sta cercando di chiudere.\n\
NON insistere. Fai UN ULTIMO tentativo breve:\n\
\"Prima di salutarti, una cosa veloce: [benefit principale]. Ti lascio il mio contatto?\"\n\
Se resiste → chiudi cordialmente senza insistere.",
    },
    AntiPatternEntry {
        id: "prospect_frustration",
        name: "Frustrazione del Prospect",
        priority: AntiPatternPriority::Critical,
        triggers: &[
            r"ma insomma|ancora\?|di nuovo\?|un'altra volta",
            r"mi stai stressando|mi stai stancando|mi hai stancato",
            r"basta così|non ne posso più|sono stufo|sono stanco",
            r"che palle|che noia|ma dai|ma come|ma che",
            r"irritato|arrabbiato|frustrato|infastidito",
            r"non mi capisci|non capisco cosa vuoi|cosa vuoi da me",
        ],
        instruction: "🚨 ALERT: IL PROSPECT È FRUSTRATO! Fermati immediatamente.\n\
1. RICONOSCI la frustrazione: \"Sento che ti sto facendo perdere la pazienza, e me ne scuso.\"\n\
2. FAI UN PASSO INDIETRO: \"Lasciami capire meglio cosa ti serve veramente.\"\n\
3. NON difenderti, NON giustificarti, NON continuare con lo script.\n\
Obiettivo: Ricostruire il rapport prima di procedere.",
    },
    AntiPatternEntry {
        id: "repeated_objection",
        name: "Obiezione Ripetuta",
        priority: AntiPatternPriority::Critical,
        triggers: &[
            r"te l'ho già detto che|come ti ho detto prima|ribadisco che",
            r"per l'ennesima volta|ti ripeto|te lo ripeto",
            r"continuo a dirti|non cambia nulla|sempre la stessa cosa",
            r"ho già detto che non|l'ho già detto",
        ],
        instruction: "🚨 OBIEZIONE RIPETUTA! Il prospect ti ha già detto questa cosa.\n\
NON rispondere con la stessa risposta di prima!\n\
Dì: \"Hai ragione, mi hai già detto questo. Evidentemente la mia risposta non ti ha convinto. Cosa ti servirebbe per sentirti più tranquillo su questo punto?\"\n\
Obiettivo: Scoprire la VERA obiezione nascosta sotto quella di superficie.",
    },
    AntiPatternEntry {
        id: "conversation_derailing",
        name: "Conversazione Deraglia",
        priority: AntiPatternPriority::High,
        triggers: &[
            r"ma questo cosa c'entra|non c'entra nulla|stiamo andando fuori tema",
            r"torniamo al punto|ma di cosa stavamo parlando|persi",
            r"non ho capito dove vuoi arrivare|il nesso|la connessione",
            r"mi sono perso|dove eravamo|confuso",
        ],
        instruction: "⚠️ LA CONVERSAZIONE STA DERAGLIANDO! Riporta focus.\n\
Dì: \"Hai ragione, lasciami riportare tutto al punto centrale.\"\n\
POI in UNA frase: ricorda l'obiettivo della chiamata.\n\
\"Stavamo parlando di [obiettivo]. Tornando a quello, [domanda diretta].\"\n\
NON divagare ulteriormente!",
    },
    AntiPatternEntry {
        id: "excessive_pressure",
        name: "Pressione Eccessiva",
        priority: AntiPatternPriority::Critical,
        triggers: &[
            r"mi stai pressando|non mi pressare|basta pressione",
            r"non insistere|smettila di insistere|sei troppo insistente",
            r"mi sento sotto pressione|mi sento forzato|mi stai forzando",
            r"non voglio essere costretto|non mi piace essere pressato",
            r"rallenta|calmati|prendila con calma",
        ],
        instruction: "🚨 STAI PRESSANDO TROPPO! Fai un passo indietro SUBITO.\n\
1. SCUSATI: \"Hai ragione, non voglio metterti fretta. Mi sono fatto prendere dall'entusiasmo.\"\n\
2. DAI CONTROLLO: \"Decidi tu i tempi. Non c'è nessuna pressione da parte mia.\"\n\
3. ASPETTA: Lascia che sia lui a ripartire. Non riempire il silenzio.\n\
Obiettivo: Rimuovere la pressione, lasciare che respiri.",
    },
    AntiPatternEntry {
        id: "trust_broken",
        name: "Fiducia Compromessa",
        priority: AntiPatternPriority::Critical,
        triggers: &[
            r"non mi fido|non ti credo|mi stai mentendo",
            r"questa è una fregatura|mi stai fregando|truffa",
            r"stai cercando solo di vendermi|pensi solo ai soldi",
            r"sei come tutti gli altri|tutti uguali voi venditori",
            r"non sei onesto|non sei sincero|non sei trasparente",
        ],
        instruction: "🚨 ALLARME: LA FIDUCIA È COMPROMESSA!\n\
NON difenderti. NON giustificarti. NON contraddire.\n\
1. VALIDA: \"Capisco il tuo scetticismo. Hai tutto il diritto di essere diffidente.\"\n\
2. TRASPARENZA: \"Non ti chiedo di fidarti. Ti chiedo solo di valutare i fatti.\"\n\
3. CONTROLLO: \"Se in qualsiasi momento senti che non fa per te, dimmelo. Nessun problema.\"\n\
Obiettivo: Ricostruire credibilità senza sembrare disperato.",
    },
];

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Archetype entries of the built-in tables as compilable specs.
pub(crate) fn archetype_specs() -> Vec<ArchetypePatternSpec> {
    ARCHETYPE_ENTRIES
        .iter()
        .map(|e| ArchetypePatternSpec {
            archetype: e.archetype,
            weight: e.weight,
            patterns: to_strings(e.patterns),
            negations: to_strings(e.negations),
        })
        .collect()
}

/// Anti-pattern entries of the built-in tables as compilable specs.
pub(crate) fn anti_pattern_specs() -> Vec<AntiPatternSpec> {
    ANTI_PATTERN_ENTRIES
        .iter()
        .map(|e| AntiPatternSpec {
            id: e.id.to_string(),
            name: e.name.to_string(),
            priority: e.priority,
            triggers: to_strings(e.triggers),
            instruction: e.instruction.to_string(),
        })
        .collect()
}

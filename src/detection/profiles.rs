/*!
 * Language profile table for the heuristic detector.
 *
 * Scripts are checked first, in declaration order; lexical profiles are
 * scored only when no script matched. Declaration order also breaks ties
 * between lexical profiles, so the order below is part of the behavior.
 */

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Bump when profiles or thresholds change in a way callers could observe
pub const TABLE_VERSION: u32 = 1;

/// Inclusive range of Unicode scalar values
pub type CharRange = (char, char);

/// A language recognizable by its writing system
#[derive(Debug, Clone)]
pub struct ScriptProfile {
    pub code: &'static str,
    pub name: &'static str,
    /// Any character in these ranges selects this profile
    pub ranges: &'static [CharRange],
    /// Counted towards the script fraction without triggering a match
    pub companion_ranges: &'static [CharRange],
    /// Lexical profiles that share the script and may refine the code
    pub variants: &'static [&'static str],
}

impl ScriptProfile {
    pub fn triggers(&self, c: char) -> bool {
        in_ranges(c, self.ranges)
    }

    pub fn counts(&self, c: char) -> bool {
        in_ranges(c, self.ranges) || in_ranges(c, self.companion_ranges)
    }
}

fn in_ranges(c: char, ranges: &[CharRange]) -> bool {
    ranges.iter().any(|(lo, hi)| (*lo..=*hi).contains(&c))
}

/// A language recognizable by its stop words
#[derive(Debug, Clone)]
pub struct LexicalProfile {
    pub code: &'static str,
    pub name: &'static str,
    pub stop_words: HashSet<&'static str>,
    /// Minimum number of matching tokens to qualify
    pub threshold: usize,
    /// Only scored as a refinement of a script profile
    pub script_variant: bool,
}

/// Scoring thresholds
#[derive(Debug, Clone, PartialEq)]
pub struct Thresholds {
    /// Texts with fewer non-whitespace characters yield no signal
    pub min_text_chars: usize,
    /// Confidence of any script match
    pub script_confidence_floor: f64,
    /// Minimum confidence for a lexical winner
    pub min_lexical_confidence: f64,
    /// Confidence of the plain-Latin English guess
    pub fallback_confidence: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            min_text_chars: 2,
            script_confidence_floor: 0.7,
            min_lexical_confidence: 0.15,
            fallback_confidence: 0.5,
        }
    }
}

/// Everything the detector knows about languages
#[derive(Debug, Clone)]
pub struct DetectionTable {
    pub version: u32,
    pub scripts: Vec<ScriptProfile>,
    pub lexicons: Vec<LexicalProfile>,
    pub thresholds: Thresholds,
    /// Code and name returned by the plain-Latin fallback
    pub fallback: (&'static str, &'static str),
}

impl DetectionTable {
    pub fn lexicon(&self, code: &str) -> Option<&LexicalProfile> {
        self.lexicons.iter().find(|l| l.code == code)
    }

    /// Codes of every language the table can return
    pub fn language_codes(&self) -> Vec<&'static str> {
        let mut codes: Vec<&'static str> = self.scripts.iter().map(|s| s.code).collect();
        for lexicon in &self.lexicons {
            if !codes.contains(&lexicon.code) {
                codes.push(lexicon.code);
            }
        }
        codes
    }
}

const DEFAULT_THRESHOLD: usize = 2;

const HAN: &[CharRange] = &[('\u{4e00}', '\u{9fff}'), ('\u{3400}', '\u{4dbf}')];

#[rustfmt::skip]
const SCRIPTS: &[ScriptProfile] = &[
    // Kana before Han: Japanese text mixes both
    ScriptProfile { code: "ja", name: "Japanese", ranges: &[('\u{3040}', '\u{309f}'), ('\u{30a0}', '\u{30ff}')], companion_ranges: HAN, variants: &[] },
    ScriptProfile { code: "zh", name: "Chinese", ranges: HAN, companion_ranges: &[], variants: &[] },
    ScriptProfile { code: "ko", name: "Korean", ranges: &[('\u{ac00}', '\u{d7af}'), ('\u{1100}', '\u{11ff}')], companion_ranges: &[], variants: &[] },
    ScriptProfile { code: "ar", name: "Arabic", ranges: &[('\u{0600}', '\u{06ff}')], companion_ranges: &[], variants: &[] },
    ScriptProfile { code: "he", name: "Hebrew", ranges: &[('\u{0590}', '\u{05ff}')], companion_ranges: &[], variants: &[] },
    ScriptProfile { code: "ru", name: "Russian", ranges: &[('\u{0400}', '\u{04ff}')], companion_ranges: &[], variants: &["ru", "uk", "bg", "sr"] },
    ScriptProfile { code: "el", name: "Greek", ranges: &[('\u{0370}', '\u{03ff}')], companion_ranges: &[], variants: &[] },
    ScriptProfile { code: "th", name: "Thai", ranges: &[('\u{0e00}', '\u{0e7f}')], companion_ranges: &[], variants: &[] },
    ScriptProfile { code: "hi", name: "Hindi", ranges: &[('\u{0900}', '\u{097f}')], companion_ranges: &[], variants: &[] },
    ScriptProfile { code: "bn", name: "Bengali", ranges: &[('\u{0980}', '\u{09ff}')], companion_ranges: &[], variants: &[] },
    ScriptProfile { code: "ta", name: "Tamil", ranges: &[('\u{0b80}', '\u{0bff}')], companion_ranges: &[], variants: &[] },
    ScriptProfile { code: "te", name: "Telugu", ranges: &[('\u{0c00}', '\u{0c7f}')], companion_ranges: &[], variants: &[] },
];

/// (code, name, script variant, stop words)
#[rustfmt::skip]
const LEXICONS: &[(&str, &str, bool, &[&str])] = &[
    ("en", "English", false, &[
        "the", "and", "is", "are", "was", "were", "of", "to", "in", "that", "it", "for", "on", "with",
        "as", "this", "be", "at", "by", "from", "have", "has", "not", "but", "what", "you", "we",
        "they", "i", "he", "she", "my", "your", "an", "or", "will", "would", "can", "there", "their",
        "which", "do", "does", "how", "hello", "a",
    ]),
    ("es", "Spanish", false, &[
        "el", "la", "los", "las", "de", "que", "y", "en", "un", "una", "es", "se", "no", "por", "con",
        "su", "para", "como", "pero", "más", "muy", "sin", "sobre", "también", "entre", "cuando",
        "porque", "donde", "este", "esta", "hola", "está", "del", "al", "lo", "le", "yo", "mi",
    ]),
    ("fr", "French", false, &[
        "le", "la", "les", "de", "des", "du", "un", "une", "et", "est", "il", "elle", "je", "tu",
        "nous", "vous", "ils", "que", "qui", "ce", "dans", "pour", "pas", "sur", "avec", "mais",
        "ou", "où", "au", "aux", "sont", "très", "bonjour", "c'est", "ne", "se", "leur", "cette",
    ]),
    ("de", "German", false, &[
        "der", "die", "das", "und", "ist", "nicht", "ein", "eine", "ich", "sie", "er", "es", "wir",
        "mit", "von", "zu", "den", "dem", "des", "auf", "für", "sich", "auch", "als", "wie", "oder",
        "aber", "noch", "nur", "wird", "sind", "bei", "hallo", "ihr", "kann", "über", "dass",
    ]),
    ("it", "Italian", false, &[
        "il", "lo", "la", "gli", "le", "di", "che", "è", "e", "non", "un", "una", "per", "con",
        "sono", "ho", "ha", "della", "del", "nel", "questo", "questa", "anche", "più", "ma", "come",
        "ciao", "mi", "si", "tutto", "molto", "perché", "io", "noi",
    ]),
    ("pt", "Portuguese", false, &[
        "o", "os", "as", "de", "que", "e", "do", "da", "em", "um", "uma", "para", "com", "não", "no",
        "na", "por", "mais", "como", "mas", "foi", "ao", "ele", "ela", "das", "dos", "tem", "seu",
        "sua", "você", "olá", "muito", "também", "são", "está", "isso",
    ]),
    ("nl", "Dutch", false, &[
        "de", "het", "een", "van", "en", "is", "op", "te", "voor", "aan", "met", "zijn", "die",
        "dat", "er", "ook", "als", "maar", "om", "niet", "tot", "uit", "bij", "door", "ik", "je",
        "wij", "hij", "zij", "wat", "hallo", "dit", "geen", "nog",
    ]),
    ("pl", "Polish", false, &[
        "i", "w", "na", "z", "do", "się", "nie", "że", "jest", "to", "od", "po", "przez", "co",
        "jak", "ale", "być", "który", "za", "dla", "czy", "tylko", "już", "jego", "jej", "tak",
        "bardzo", "jestem", "dzień", "dobry", "ten", "ta",
    ]),
    ("sv", "Swedish", false, &[
        "och", "att", "det", "som", "är", "på", "för", "av", "med", "den", "till", "om", "var",
        "han", "ett", "har", "inte", "kan", "men", "från", "eller", "hej", "jag", "vi", "du",
        "mycket", "också", "här", "där", "hur",
    ]),
    ("da", "Danish", false, &[
        "og", "af", "til", "en", "at", "det", "er", "som", "på", "den", "for", "med", "han", "var",
        "ikke", "har", "om", "et", "fra", "men", "hun", "kan", "jeg", "vi", "du", "meget", "også",
        "hvor", "hvad", "hej",
    ]),
    ("no", "Norwegian", false, &[
        "og", "av", "til", "en", "å", "på", "som", "det", "er", "for", "med", "den", "var", "ikke",
        "har", "om", "et", "fra", "men", "hun", "kan", "jeg", "vi", "du", "meget", "også", "hvor",
        "hva", "hei", "ikkje", "blir",
    ]),
    ("tr", "Turkish", false, &[
        "bir", "ve", "bu", "için", "de", "da", "ile", "mi", "ne", "ki", "daha", "çok", "olan",
        "var", "gibi", "ben", "sen", "biz", "siz", "ama", "değil", "merhaba", "nasıl", "neden",
        "şey", "kadar", "sonra", "her",
    ]),
    ("fi", "Finnish", false, &[
        "ja", "on", "ei", "se", "että", "hän", "oli", "ovat", "mutta", "kun", "niin", "minä",
        "sinä", "me", "te", "he", "tämä", "tai", "jos", "kuin", "myös", "vain", "hyvä", "kiitos",
        "mitä", "missä", "olen",
    ]),
    ("cs", "Czech", false, &[
        "a", "je", "se", "na", "v", "že", "to", "s", "z", "do", "jsem", "jsou", "ale", "jak",
        "pro", "tak", "by", "byl", "jako", "už", "není", "ahoj", "děkuji", "co", "když", "také",
        "který", "jsme",
    ]),
    ("sk", "Slovak", false, &[
        "a", "je", "sa", "na", "v", "že", "to", "s", "z", "do", "som", "sú", "ale", "ako", "pre",
        "tak", "by", "bol", "už", "nie", "ahoj", "ďakujem", "čo", "keď", "aj", "ktorý", "sme",
    ]),
    ("sl", "Slovenian", false, &[
        "in", "je", "se", "na", "v", "da", "za", "so", "ki", "z", "pa", "ne", "sem", "bi", "ali",
        "kot", "tudi", "pri", "po", "zdravo", "hvala", "kaj", "kje", "ker", "smo", "bo",
    ]),
    ("hr", "Croatian", false, &[
        "i", "je", "se", "u", "na", "da", "za", "su", "od", "ne", "sam", "bi", "ali", "kao",
        "to", "što", "koji", "ili", "iz", "bio", "bok", "hvala", "gdje", "kada", "jer", "smo",
    ]),
    ("ro", "Romanian", false, &[
        "și", "în", "de", "la", "cu", "pe", "un", "o", "nu", "este", "să", "că", "din", "pentru",
        "mai", "care", "sunt", "sau", "dar", "acest", "această", "bună", "mulțumesc", "ce", "eu",
    ]),
    ("hu", "Hungarian", false, &[
        "a", "az", "és", "hogy", "nem", "is", "egy", "van", "meg", "de", "ez", "mint", "csak",
        "már", "még", "vagy", "volt", "én", "te", "mi", "ti", "szia", "köszönöm", "nagyon", "itt",
        "ott", "azt",
    ]),
    ("lt", "Lithuanian", false, &[
        "ir", "yra", "kad", "bet", "su", "iš", "į", "ne", "tai", "kaip", "jis", "ji", "aš", "tu",
        "mes", "jūs", "labas", "ačiū", "kur", "kas", "buvo", "dar", "tik",
    ]),
    ("lv", "Latvian", false, &[
        "un", "ir", "ka", "bet", "ar", "no", "uz", "ne", "tas", "kā", "viņš", "viņa", "es", "tu",
        "mēs", "jūs", "sveiki", "paldies", "kur", "kas", "bija", "vēl", "tikai",
    ]),
    ("et", "Estonian", false, &[
        "ja", "on", "ei", "et", "see", "ta", "oli", "aga", "kui", "nii", "mina", "sina", "meie",
        "teie", "nad", "või", "ka", "ainult", "tere", "aitäh", "mis", "kus", "olen",
    ]),
    ("id", "Indonesian", false, &[
        "yang", "dan", "di", "ini", "itu", "dengan", "untuk", "tidak", "dari", "dalam", "akan",
        "pada", "juga", "saya", "kamu", "kami", "mereka", "ada", "bisa", "sudah", "belum", "apa",
        "terima", "kasih", "selamat",
    ]),
    ("ms", "Malay", false, &[
        "yang", "dan", "di", "ini", "itu", "dengan", "untuk", "tidak", "dari", "dalam", "akan",
        "pada", "juga", "saya", "awak", "kami", "mereka", "ada", "boleh", "sudah", "belum", "apa",
        "ialah", "adalah", "tersebut",
    ]),
    ("vi", "Vietnamese", false, &[
        "và", "của", "là", "có", "không", "được", "cho", "trong", "một", "những", "các", "này",
        "với", "tôi", "bạn", "chúng", "người", "đã", "sẽ", "xin", "chào", "cảm", "ơn",
    ]),
    ("ha", "Hausa (Nigeria)", false, &[
        "da", "na", "ba", "ta", "ya", "ne", "ce", "wannan", "suka", "kuma", "daga", "zuwa",
        "cikin", "amma", "shi", "ita", "su", "mu", "ku", "ni", "yana", "tana", "akwai", "sannu",
        "nagode", "don",
    ]),
    ("yo", "Yoruba (Nigeria)", false, &[
        "ni", "ti", "sí", "wọn", "mo", "fún", "pẹ̀lú", "jẹ́", "kò", "náà", "yìí", "àti", "nítorí",
        "ṣùgbọ́n", "láti", "gbogbo", "kan", "wa", "ẹ", "bẹ́ẹ̀ni", "bawo", "ṣé",
    ]),
    ("ig", "Igbo (Nigeria)", false, &[
        "na", "ya", "ka", "ha", "ga", "anyị", "unu", "nke", "bụ", "dị", "maka", "mana", "otu",
        "ihe", "ndị", "ebe", "onye", "kedu", "daalụ", "m", "gị", "ọ",
    ]),
    // Cyrillic variants, scored only after a Cyrillic script match
    ("ru", "Russian", true, &[
        "и", "в", "не", "на", "я", "что", "с", "он", "как", "это", "по", "но", "она", "к", "у",
        "мы", "вы", "из", "за", "так", "же", "от", "все", "для", "привет", "спасибо", "очень",
        "его", "был", "есть",
    ]),
    ("uk", "Ukrainian", true, &[
        "і", "в", "не", "на", "я", "що", "з", "він", "як", "це", "по", "але", "вона", "до", "у",
        "ми", "ви", "із", "за", "так", "від", "все", "для", "привіт", "дякую", "дуже", "його",
        "був", "є", "та",
    ]),
    ("bg", "Bulgarian", true, &[
        "и", "в", "не", "на", "аз", "че", "с", "той", "как", "това", "по", "но", "тя", "към",
        "ние", "вие", "от", "за", "така", "всички", "здравей", "благодаря", "много", "беше", "е",
        "са", "ще",
    ]),
    ("sr", "Serbian", true, &[
        "и", "у", "не", "на", "ја", "да", "са", "он", "као", "то", "по", "али", "она", "ка",
        "ми", "ви", "из", "за", "тако", "од", "све", "здраво", "хвала", "много", "је", "су",
        "што", "био",
    ]),
];

fn build_default_table() -> DetectionTable {
    let lexicons = LEXICONS
        .iter()
        .map(|(code, name, script_variant, words)| LexicalProfile {
            code: *code,
            name: *name,
            stop_words: words.iter().copied().collect(),
            threshold: DEFAULT_THRESHOLD,
            script_variant: *script_variant,
        })
        .collect();

    DetectionTable {
        version: TABLE_VERSION,
        scripts: SCRIPTS.to_vec(),
        lexicons,
        thresholds: Thresholds::default(),
        fallback: ("en", "English"),
    }
}

/// Process-wide table, built on first use
pub static DEFAULT_TABLE: Lazy<DetectionTable> = Lazy::new(build_default_table);

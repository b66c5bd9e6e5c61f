//! Address and guardian line masking
//!
//! A line that mentions an address or kinship keyword is masked in full,
//! not just the matching word: the house number or name next to "house" or
//! "S/O" is exactly what must not leak.

use crate::grouping::Block;
use crate::pattern::normalize_whitespace;

use super::plan::{MaskPlan, MaskRect, MaskReason};

/// English address and kinship keywords
pub const ENGLISH_KEYWORDS: &[&str] = &[
    "address", "addr", "s/o", "d/o", "w/o", "c/o", "father", "mother", "guardian", "house",
    "building", "flat", "apartment", "floor", "block", "sector", "lane", "road", "street", "near",
    "opposite", "behind", "beside", "village", "town", "city", "district", "taluka", "tehsil",
    "state", "pin", "pincode", "post", "po", "p.o", "area", "locality", "colony", "ward",
    "location", "residence",
];

/// Hindi address and kinship keywords
pub const HINDI_KEYWORDS: &[&str] = &[
    "पता", "ग्राम", "पोस्ट", "पिन", "पिनकोड", "जिला", "राज्य", "तालुका", "तहसील", "सड़क", "गली",
    "मार्ग", "नगर", "शहर", "मकान", "फ्लैट", "मंजिल", "ब्लॉक", "सेक्टर", "निकट", "सामने", "पीछे",
    "बगल", "नजदीक", "पड़ोस", "स्थान", "इलाका", "कालोनी", "वार्ड", "आवास", "स्थाई", "अस्थाई",
    "पिता", "माता", "अभिभावक", "स/ओ", "डी/ओ", "डब्ल्यू/ओ", "सी/ओ",
];

/// Marathi address and kinship keywords
pub const MARATHI_KEYWORDS: &[&str] = &[
    "पत्ता", "गाव", "पोस्ट", "पिन", "पिनकोड", "जिल्हा", "राज्य", "तालुका", "तहसील", "रस्ता", "गली",
    "मार्ग", "नगर", "शहर", "घर", "इमारत", "मजला", "ब्लॉक", "सेक्टर", "जवळ", "समोर", "मागे",
    "शेजारी", "पडोसी", "ठिकाण", "परिसर", "वसाहत", "वार्ड", "निवास", "स्थायी", "अस्थायी",
    "राहण्याचे", "वडील", "आई", "पालक", "स/ओ", "ड/ओ", "डब्ल्यू/ओ", "सी/ओ",
];

/// Keyword set used to recognize address lines
#[derive(Debug, Clone, PartialEq)]
pub struct AddressKeywords {
    keywords: Vec<String>,
}

impl Default for AddressKeywords {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AddressKeywords {
    /// Built-in English, Hindi and Marathi keywords, deduplicated
    pub fn builtin() -> Self {
        let mut set = Self {
            keywords: Vec::new(),
        };
        set.extend(
            ENGLISH_KEYWORDS
                .iter()
                .chain(HINDI_KEYWORDS)
                .chain(MARATHI_KEYWORDS)
                .copied(),
        );
        set
    }

    /// Add keywords; they are lowercased and blanks are ignored
    pub fn extend<I, S>(&mut self, extra: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for keyword in extra {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !self.keywords.contains(&keyword) {
                self.keywords.push(keyword);
            }
        }
    }

    /// Number of keywords
    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// First keyword contained in `text`, case-insensitively
    pub fn find(&self, text: &str) -> Option<&str> {
        let lowered = normalize_whitespace(text).to_lowercase();
        self.keywords
            .iter()
            .find(|k| lowered.contains(k.as_str()))
            .map(String::as_str)
    }
}

/// Result of the address pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressMaskResult {
    /// Planned rectangles
    pub plan: MaskPlan,
    /// Texts of every masked block
    pub masked_blocks: Vec<Vec<String>>,
}

/// Address block masker
pub struct AddressBlockMasker;

impl AddressBlockMasker {
    /// Plan masks for every region of every block that mentions a keyword
    pub fn plan(blocks: &[Block], keywords: &AddressKeywords) -> AddressMaskResult {
        let mut result = AddressMaskResult::default();

        for block in blocks {
            let Some(keyword) = block.regions.iter().find_map(|r| keywords.find(&r.text)) else {
                continue;
            };

            for region in &block.regions {
                result
                    .plan
                    .add(MaskRect::from_region(region, MaskReason::AddressBlock));
            }

            let texts: Vec<String> = block.regions.iter().map(|r| r.text.clone()).collect();
            tracing::info!(keyword, texts = ?texts, "Masked address block");
            result.masked_blocks.push(texts);
        }

        result
    }
}

//! Fixed tables the pipeline matches against: regions, prompt channels,
//! the public-event topic taxonomy, and the Massachusetts service territory.

use crate::types::Region;

/// A thematically distinct prompt issued per region to widen recall.
#[derive(Debug, Clone, Copy)]
pub struct Channel {
    pub name: &'static str,
    pub focus: &'static str,
}

/// Business-mode channels. Three per region to increase recall.
pub const BUSINESS_CHANNELS: &[Channel] = &[
    Channel {
        name: "Chamber & Networking",
        focus: "chamber of commerce mixers, networking breakfasts, business after-hours, member expos, young professionals",
    },
    Channel {
        name: "Conferences/Trade Shows/Expos",
        focus: "industry conferences, trade shows, regional business expos, sector-specific showcases (manufacturing, construction, retail, hospitality, tech)",
    },
    Channel {
        name: "Workshops/Training/Programs",
        focus: "SBA/SBDC/SCORE workshops, university incubators/accelerators, economic development programs, procurement/government contracting",
    },
];

/// Closed topic taxonomy for public events. Invalid values are coerced to
/// "Other", never dropped.
pub const TOPIC_TAXONOMY: &[&str] = &[
    "Consumer Education",
    "Scam Prevention",
    "Shredding/Identity Theft",
    "Senior Outreach",
    "Military/Veterans",
    "Youth/Students",
    "Community Festival/Fair",
    "Parade/Civic",
    "Job/Career",
    "Housing/Home Improvement",
    "Health/Wellness",
    "Sustainability",
    "Finance/Budgeting",
    "Technology/Cyber",
    "Other",
];

pub const OTHER_TOPIC: &str = "Other";

/// City hints help the model fan out geographically within a state.
pub fn city_hints(region: Region) -> &'static [&'static str] {
    match region {
        Region::Massachusetts => &[
            "Boston", "Cambridge", "Worcester", "Springfield", "Lowell", "Framingham",
            "New Bedford", "Quincy", "Fall River", "Brockton", "Lynn", "Plymouth",
            "Newton", "Somerville", "Salem", "Gloucester", "Haverhill",
        ],
        Region::Maine => &[
            "Portland", "Bangor", "Lewiston", "Augusta", "Auburn", "Biddeford",
            "South Portland", "Brunswick", "Saco", "Sanford",
        ],
        Region::RhodeIsland => &[
            "Providence", "Warwick", "Cranston", "Pawtucket", "Newport",
            "East Providence", "North Providence", "Woonsocket",
        ],
        Region::Vermont => &[
            "Burlington", "South Burlington", "Rutland", "Montpelier", "Brattleboro",
            "St. Albans", "Bennington", "Colchester", "Essex",
        ],
    }
}

/// Massachusetts counties inside the service territory. County is
/// authoritative when the generator supplies one.
pub const SERVED_MA_COUNTIES: &[&str] = &[
    "barnstable",
    "bristol",
    "dukes",
    "essex",
    "middlesex",
    "nantucket",
    "norfolk",
    "plymouth",
    "suffolk",
];

/// Out-of-territory Massachusetts cities, used as a fallback heuristic when
/// the generator omits the county.
pub const EXCLUDED_MA_CITIES: &[&str] = &[
    "worcester",
    "springfield",
    "pittsfield",
    "holyoke",
    "chicopee",
    "westfield",
    "fitchburg",
    "leominster",
    "amherst",
    "northampton",
    "greenfield",
];

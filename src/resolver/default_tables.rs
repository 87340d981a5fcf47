// ==========================================
// 档案著录迁移 - 默认受控词映射表
// ==========================================
// 职责: 常用类别的源值 → 目标值（键不区分大小写）
// 说明: 机构定制值通过 JSON 表文件覆盖/补充
// ==========================================

use crate::resolver::enum_resolver_trait::EnumCategory;

type Table = &'static [(&'static str, &'static str)];

const EXTENT_TYPES: Table = &[
    ("Cubic Feet", "cubic_feet"),
    ("Linear Feet", "linear_feet"),
    ("Items", "items"),
    ("Gigabytes", "gigabytes"),
    ("Megabytes", "megabytes"),
    ("Photographic Prints", "photographic_prints"),
    ("Photographic Slides", "photographic_slides"),
    ("Reels", "reels"),
    ("Sheets", "sheets"),
    ("Volumes", "volumes"),
    ("Leaves", "leaves"),
    ("Files", "files"),
];

const DATE_LABELS: Table = &[
    ("Creation", "creation"),
    ("Publication", "publication"),
    ("Record Keeping", "record_keeping"),
    ("Broadcast", "broadcast"),
    ("Copyright", "copyright"),
    ("Deaccession", "deaccession"),
    ("Digitized", "digitized"),
    ("Event", "event"),
    ("Issued", "issued"),
    ("Modified", "modified"),
    ("Other", "other"),
];

const DATE_CERTAINTY: Table = &[
    ("approximate", "approximate"),
    ("circa", "approximate"),
    ("inferred", "inferred"),
    ("questionable", "questionable"),
];

const DATE_ERA: Table = &[("ce", "ce"), ("bce", "bce")];

const DATE_CALENDAR: Table = &[("gregorian", "gregorian"), ("julian", "julian")];

const RESOURCE_LEVELS: Table = &[
    ("class", "class"),
    ("collection", "collection"),
    ("file", "file"),
    ("fonds", "fonds"),
    ("item", "item"),
    ("otherlevel", "otherlevel"),
    ("recordgrp", "recordgrp"),
    ("series", "series"),
    ("subfonds", "subfonds"),
    ("subgrp", "subgrp"),
    ("subseries", "subseries"),
];

const SINGLE_PART_NOTE_TYPES: Table = &[
    ("Abstract", "abstract"),
    ("Physical Description", "physdesc"),
    ("Language of Materials note", "langmaterial"),
    ("Location note", "physloc"),
    ("Material Specific Details", "materialspec"),
    ("Physical Facet", "physfacet"),
];

const MULTI_PART_NOTE_TYPES: Table = &[
    ("Accruals note", "accruals"),
    ("Appraisal note", "appraisal"),
    ("Arrangement note", "arrangement"),
    ("Biographical/Historical note", "bioghist"),
    ("Conditions Governing Access note", "accessrestrict"),
    ("Conditions Governing Use note", "userestrict"),
    ("Custodial History note", "custodhist"),
    ("Dimensions note", "dimensions"),
    ("Existence and Location of Copies note", "altformavail"),
    ("Existence and Location of Originals note", "originalsloc"),
    ("File Plan note", "fileplan"),
    ("General note", "odd"),
    ("Immediate Source of Acquisition note", "acqinfo"),
    ("Legal Status note", "legalstatus"),
    ("Other Finding Aids note", "otherfindaid"),
    ("Physical Characteristics and Technical Requirements note", "phystech"),
    ("Preferred Citation note", "prefercite"),
    ("Processing Information note", "processinfo"),
    ("Related Archival Materials note", "relatedmaterial"),
    ("Scope and Contents note", "scopecontent"),
    ("Separated Materials note", "separatedmaterial"),
];

const DIGITAL_OBJECT_NOTE_TYPES: Table = &[
    ("Biographical/Historical note", "bioghist"),
    ("Conditions Governing Access note", "accessrestrict"),
    ("Conditions Governing Use note", "userestrict"),
    ("Dimensions note", "dimensions"),
    ("General note", "note"),
    ("Preferred Citation note", "prefercite"),
    ("Scope and Contents note", "summary"),
];

const ORDERED_LIST_ENUMERATION: Table = &[
    ("arabic", "arabic"),
    ("loweralpha", "loweralpha"),
    ("upperalpha", "upperalpha"),
    ("lowerroman", "lowerroman"),
    ("upperroman", "upperroman"),
    ("", "null"),
];

const INSTANCE_TYPES: Table = &[
    ("Audio", "audio"),
    ("Books", "books"),
    ("Computer disks / tapes", "computer_disks"),
    ("Graphic materials", "graphic_materials"),
    ("Maps", "maps"),
    ("Microform", "microform"),
    ("Mixed materials", "mixed_materials"),
    ("Moving Images", "moving_images"),
    ("Realia", "realia"),
    ("Text", "text"),
];

const CONTAINER_TYPES: Table = &[
    ("Box", "box"),
    ("Carton", "carton"),
    ("Case", "case"),
    ("Folder", "folder"),
    ("Frame", "frame"),
    ("Item", "item"),
    ("Oversize Box", "oversize_box"),
    ("Oversize Folder", "oversize_folder"),
    ("Reel", "reel"),
    ("Volume", "volume"),
];

const DIGITAL_OBJECT_TYPES: Table = &[
    ("cartographic", "cartographic"),
    ("mixed materials", "mixed_materials"),
    ("moving image", "moving_image"),
    ("notated music", "notated_music"),
    ("software, multimedia", "software_multimedia"),
    ("sound recording", "sound_recording"),
    ("sound recording-musical", "sound_recording_musical"),
    ("sound recording-nonmusical", "sound_recording_nonmusical"),
    ("still image", "still_image"),
    ("text", "text"),
    ("three dimensional object", "three_dimensional_object"),
];

const FILE_VERSION_USE_STATEMENTS: Table = &[
    ("Audio-Clip", "audio-clip"),
    ("Audio-Master", "audio-master"),
    ("Audio-Service", "audio-service"),
    ("Image-Master", "image-master"),
    ("Image-Service", "image-service"),
    ("Image-Thumbnail", "image-thumbnail"),
    ("Text-Codebook", "text-codebook"),
    ("Text-Data", "text-data"),
    ("Text-OCR-Edited", "text-ocr-edited"),
    ("Video-Master", "video-master"),
    ("Video-Service", "video-service"),
];

const ACQUISITION_TYPES: Table = &[
    ("Deposit", "deposit"),
    ("Gift", "gift"),
    ("Purchase", "purchase"),
    ("Transfer", "transfer"),
];

const ACCESSION_RESOURCE_TYPES: Table = &[
    ("Collection", "collection"),
    ("Papers", "papers"),
    ("Publications", "publications"),
    ("Records", "records"),
];

const PROCESSING_PRIORITY: Table = &[("High", "high"), ("Medium", "medium"), ("Low", "low")];

const PROCESSING_STATUS: Table = &[
    ("New", "new"),
    ("In Progress", "in_progress"),
    ("Completed", "completed"),
];

const FINDING_AID_DESCRIPTION_RULES: Table = &[
    ("Anglo-American Cataloging Rules", "aacr"),
    ("Describing Archives: A Content Standard", "dacs"),
    ("Rules for Archival Description", "rad"),
    ("Cataloging Cultural Objects", "cco"),
];

const FINDING_AID_STATUS: Table = &[
    ("Completed", "completed"),
    ("In Process", "in_process"),
    ("Under Revision", "under_revision"),
    ("Unprocessed", "unprocessed"),
];

const SUBJECT_SOURCES: Table = &[
    ("Library of Congress Subject Headings", "lcsh"),
    ("Art & Architecture Thesaurus", "aat"),
    ("Getty Thesaurus of Geographic Names", "tgn"),
    ("Medical Subject Headings", "mesh"),
    ("Thesaurus for Graphic Materials", "gmgpc"),
    ("local sources", "local"),
];

const SUBJECT_TERM_TYPES: Table = &[
    ("Topical Term (650)", "topical"),
    ("Geographic Name (651)", "geographic"),
    ("Genre / Form (655)", "genre_form"),
    ("Occupation (656)", "occupation"),
    ("Function (657)", "function"),
    ("Uniform Title (630)", "uniform_title"),
];

const NAME_SOURCES: Table = &[
    ("Library of Congress Name Authority File", "naf"),
    ("Union List of Artist Names", "ulan"),
    ("NAD / ARK II Name Authority Database", "nad"),
    ("local sources", "local"),
];

const NAME_RULES: Table = &[
    ("Anglo-American Cataloging Rules", "aacr"),
    ("Describing Archives: A Content Standard", "dacs"),
    ("local", "local"),
];

const NAME_DESCRIPTION_TYPES: Table = &[
    ("Biography", "Biographical Statement"),
    ("Administrative History", "Administrative History"),
];

const SALUTATIONS: Table = &[
    ("Mr.", "mr"),
    ("Mrs.", "mrs"),
    ("Ms.", "ms"),
    ("Madame", "madame"),
    ("Sir", "sir"),
];

const LANGUAGE_CODES: Table = &[
    ("eng", "eng"),
    ("English", "eng"),
    ("fre", "fre"),
    ("French", "fre"),
    ("ger", "ger"),
    ("German", "ger"),
    ("spa", "spa"),
    ("Spanish", "spa"),
    ("chi", "chi"),
    ("Chinese", "chi"),
    ("lat", "lat"),
    ("Latin", "lat"),
];

/// 默认映射表（类别 → 源值/目标值对）
pub fn default_tables() -> Vec<(EnumCategory, Table)> {
    vec![
        (EnumCategory::ExtentType, EXTENT_TYPES),
        (EnumCategory::DateLabel, DATE_LABELS),
        (EnumCategory::DateCertainty, DATE_CERTAINTY),
        (EnumCategory::DateEra, DATE_ERA),
        (EnumCategory::DateCalendar, DATE_CALENDAR),
        (EnumCategory::ResourceLevel, RESOURCE_LEVELS),
        (EnumCategory::ArchivalObjectLevel, RESOURCE_LEVELS),
        (EnumCategory::SinglePartNoteType, SINGLE_PART_NOTE_TYPES),
        (EnumCategory::MultiPartNoteType, MULTI_PART_NOTE_TYPES),
        (EnumCategory::DigitalObjectNoteType, DIGITAL_OBJECT_NOTE_TYPES),
        (EnumCategory::OrderedListEnumeration, ORDERED_LIST_ENUMERATION),
        (EnumCategory::InstanceType, INSTANCE_TYPES),
        (EnumCategory::ContainerType, CONTAINER_TYPES),
        (EnumCategory::DigitalObjectType, DIGITAL_OBJECT_TYPES),
        (EnumCategory::FileVersionUseStatement, FILE_VERSION_USE_STATEMENTS),
        (EnumCategory::AcquisitionType, ACQUISITION_TYPES),
        (EnumCategory::AccessionResourceType, ACCESSION_RESOURCE_TYPES),
        (EnumCategory::ProcessingPriority, PROCESSING_PRIORITY),
        (EnumCategory::ProcessingStatus, PROCESSING_STATUS),
        (EnumCategory::FindingAidDescriptionRules, FINDING_AID_DESCRIPTION_RULES),
        (EnumCategory::FindingAidStatus, FINDING_AID_STATUS),
        (EnumCategory::SubjectSource, SUBJECT_SOURCES),
        (EnumCategory::SubjectTermType, SUBJECT_TERM_TYPES),
        (EnumCategory::NameSource, NAME_SOURCES),
        (EnumCategory::NameRule, NAME_RULES),
        (EnumCategory::NameDescriptionType, NAME_DESCRIPTION_TYPES),
        (EnumCategory::Salutation, SALUTATIONS),
        (EnumCategory::LanguageCode, LANGUAGE_CODES),
    ]
}

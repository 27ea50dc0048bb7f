use goblin::mach::segment::Section;

/// One Mach-O section, flattened out of its segment.
///
/// Only the header fields are kept. Nothing in the analysis reads section
/// contents, so the raw bytes stay behind in the parsed file.
#[derive(Debug, Clone)]
pub struct MachSection {
    pub name: String,
    pub segment: String,
    pub vma: u64,
    pub size: u64,
    pub file_offset: u64,
    pub flags: u64,
}

impl MachSection {
    pub fn from_goblin(section: &Section) -> Self {
        MachSection {
            name: section.name().unwrap_or("").to_string(),
            segment: section.segname().unwrap_or("").to_string(),
            vma: section.addr,
            size: section.size,
            file_offset: section.offset as u64,
            flags: section.flags as u64,
        }
    }
}

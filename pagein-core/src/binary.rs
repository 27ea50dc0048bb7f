use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use goblin::mach::{Mach, MachO, MultiArch, SingleArch};
use goblin::Object;

use crate::objc::{self, ObjcClass};
use crate::sections::MachSection;

pub struct MachBinary {
    pub path: String,
    pub sections: Vec<MachSection>,
    /// Every Objective-C class defined in the image, sorted by name.
    pub classes: Vec<ObjcClass>,
    pub is_64: bool,
}

impl MachBinary {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let buf = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let obj = Object::parse(&buf)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        let macho = match obj {
            Object::Mach(Mach::Binary(macho)) => macho,
            Object::Mach(Mach::Fat(multi)) => {
                log::info!(
                    "fat binary with {} architectures; analyzing the first Mach-O slice",
                    multi.narches
                );
                first_macho_slice(&multi)?
            }
            _ => bail!("not a Mach-O binary: {}", path.display()),
        };

        let mut sections = Vec::new();
        for segment in macho.segments.iter() {
            for (section, _data) in segment.sections()? {
                sections.push(MachSection::from_goblin(&section));
            }
        }
        log::info!(
            "collected {} sections from {} segments",
            sections.len(),
            macho.segments.len()
        );

        let classes = objc::classes_from_symbols(&macho)?;
        if classes.is_empty() {
            log::info!("no Objective-C class symbols in {}", path.display());
        } else {
            log::info!(
                "found {} Objective-C classes in the symbol table",
                classes.len()
            );
        }

        Ok(Self {
            path: path.display().to_string(),
            sections,
            classes,
            is_64: macho.is_64,
        })
    }

    /// First section with the given name, across all segments.
    pub fn section(&self, name: &str) -> Option<&MachSection> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Classes that may implement `+load`.
    ///
    /// The presence of `__objc_nlclslist` gates the answer: without it there
    /// are no non-lazy classes and the result is empty. With it, the precise
    /// subset cannot be named (see `objc::classes_from_symbols`), so the
    /// whole class list is returned as the candidate set.
    pub fn load_method_candidates(&self) -> &[ObjcClass] {
        let Some(section) = self.section(objc::NON_LAZY_CLASS_LIST) else {
            log::info!(
                "no {} section; no explicit +load methods, or a pure Swift image",
                objc::NON_LAZY_CLASS_LIST
            );
            return &[];
        };

        log::info!(
            "found {} section ({} bytes)",
            objc::NON_LAZY_CLASS_LIST,
            section.size
        );
        log::warn!("listing every Objective-C class in the image as the candidate set");
        log::warn!(
            "matching {} entries to class names needs virtual address resolution, which is not implemented",
            objc::NON_LAZY_CLASS_LIST
        );
        &self.classes
    }
}

fn first_macho_slice<'a>(multi: &MultiArch<'a>) -> Result<MachO<'a>> {
    for index in 0..multi.narches {
        match multi.get(index) {
            Ok(SingleArch::MachO(macho)) => return Ok(macho),
            Ok(SingleArch::Archive(_)) => {
                log::debug!("slice {} is a static archive, skipping", index);
            }
            Err(err) => log::warn!("slice {} is unreadable: {}", index, err),
        }
    }
    Err(anyhow!("fat binary contains no Mach-O slice"))
}

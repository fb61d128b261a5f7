/// Qt Designer `.ui` to Swift/Qlift transformer
pub mod ast;
pub mod codegen;
pub mod declarations;
pub mod error;
pub mod parser;
pub mod strings;
pub mod values;

pub use error::TransformError;
pub use strings::{LocalizationTable, LocalizedEntry};

use crate::transpiler::codegen::CodeGenerator;
use crate::transpiler::declarations::prepare;
use crate::transpiler::parser::Parser;

/// Name of the file written in extension mode
pub const EXTENSION_FILE_NAME: &str = "language_bundle_accessor.swift";

const EXTENSION_SOURCE: &str = include_str!("../../templates/language_bundle_accessor.swift");

const BANNER_RULE: &str =
    "********************************************************************************";

/// Both artifacts of one document
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    /// Complete Swift source, banner included
    pub code: String,
    /// Localized strings, empty unless localization was requested
    pub strings: LocalizationTable,
}

/// Transform one `.ui` document.
///
/// `file_stem` is the input's file name without extension; it names the banner's source
/// file and the `.strings` table used by localized lookups. All state is local to the call.
pub fn transform(
    data: &[u8],
    file_stem: &str,
    localize: bool,
) -> Result<Transformed, TransformError> {
    let mut doc = Parser::new(data).parse()?;
    log::debug!("{}: parsed {} nodes", file_stem, doc.len());

    let form = prepare(&mut doc)?;

    let mut generator = CodeGenerator::new(&doc, file_stem, localize);
    let body = generator.generate(&form)?;
    let strings = generator.into_strings();
    log::debug!(
        "{}: generated class {} with {} localized string(s)",
        file_stem,
        form.class_name,
        strings.len()
    );

    let mut code = banner(&format!("{}.ui", file_stem));
    code.push_str(&body);
    Ok(Transformed { code, strings })
}

/// Header comment naming the source file
pub fn banner(source_name: &str) -> String {
    format!(
        "/{rule}\n\
         ** Form generated from reading UI file '{source}'\n\
         **\n\
         ** Created by: Qlift User Interface Compiler version {version}\n\
         **\n\
         ** WARNING! All changes made in this file will be lost when recompiling UI file!\n\
         {rule}/\n\n",
        rule = BANNER_RULE,
        source = source_name,
        version = env!("CARGO_PKG_VERSION"),
    )
}

/// The fixed `Bundle.lang` accessor written in extension mode
pub fn extension_source() -> &'static str {
    EXTENSION_SOURCE
}

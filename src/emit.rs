//! Classifies the reflected module surface and emits the stub text.
//!
//! Emission is a single left-to-right pass over the snapshot. Each entity is
//! resolved against the metadata index through the name registry; entities the
//! index does not know degrade to the docstring-prototype fallback or to the
//! `any` marker, and emission always continues with the next name.

use std::io::Write;

use anyhow::Result;
use tracing::debug;

use crate::index::{MemberDescriptor, MetadataIndex};
use crate::proto::parse_prototype;
use crate::reflect::{ExposedMember, MemberShape, ModuleSnapshot, is_public};
use crate::registry::NameRegistry;
use crate::translate::{TypeTranslator, UNKNOWN};

/// One parameter of an emitted declaration, with the raw native type kept as
/// a trailing comment when it is known.
struct EmittedArg {
    name: String,
    ty: String,
    comment: Option<String>,
}

pub struct StubEmitter<'a, W: Write> {
    out: W,
    module: &'a str,
    index: &'a MetadataIndex,
    registry: &'a NameRegistry,
    translator: &'a TypeTranslator,
}

impl<'a, W: Write> StubEmitter<'a, W> {
    pub fn new(
        out: W,
        module: &'a str,
        index: &'a MetadataIndex,
        registry: &'a NameRegistry,
        translator: &'a TypeTranslator,
    ) -> Self {
        Self {
            out,
            module,
            index,
            registry,
            translator,
        }
    }

    /// Walks the snapshot in reflection order and writes the complete stub.
    pub fn emit_module(&mut self, snapshot: &ModuleSnapshot) -> Result<()> {
        writeln!(self.out, "import numpy")?;

        for member in &snapshot.members {
            if !is_public(&member.name) {
                continue;
            }
            match &member.shape {
                MemberShape::Class { members } => self.emit_class(&member.name, members)?,
                MemberShape::Callable { doc } => {
                    self.emit_callable(self.module, &member.name, doc.as_deref(), "")?;
                    writeln!(self.out)?;
                }
                MemberShape::Attribute | MemberShape::Opaque => {
                    debug!(name = %member.name, "skipping non-class, non-callable entity");
                }
            }
        }

        Ok(())
    }

    fn emit_class(&mut self, name: &str, members: &[ExposedMember]) -> Result<()> {
        writeln!(self.out, "class {name}:")?;

        if let Some(native) = self.registry.exposed_to_native(name)
            && let Some(doc) = self.index.class_doc(native)
            && let Some(brief) = &doc.brief
        {
            writeln!(self.out, "  \"\"\"{brief}\"\"\"")?;
        }

        for member in members {
            if !is_public(&member.name) {
                continue;
            }
            match &member.shape {
                MemberShape::Callable { doc } => {
                    self.emit_callable(name, &member.name, doc.as_deref(), "  ")?;
                }
                MemberShape::Class { .. } | MemberShape::Attribute | MemberShape::Opaque => {
                    self.emit_attribute(name, &member.name)?;
                }
            }
        }

        writeln!(self.out)?;
        Ok(())
    }

    /// Resolves the structured descriptor for `(owner, name)`. The
    /// constructor is documented under the class's own name.
    fn resolve(&self, owner: &str, name: &str) -> Option<&'a MemberDescriptor> {
        let native = self.registry.exposed_to_native(owner)?;
        let key = if name == "__init__" { owner } else { name };
        self.index.member(native, key)
    }

    fn emit_callable(
        &mut self,
        owner: &str,
        name: &str,
        doc: Option<&str>,
        prefix: &str,
    ) -> Result<()> {
        match self.resolve(owner, name) {
            Some(descriptor) => self.emit_structured(owner, name, descriptor, prefix),
            None => self.emit_fallback(name, doc, prefix),
        }
    }

    /// Structured path: declared parameters and return type from the index,
    /// with the documentation body assembled from brief, parameter docs,
    /// remarks, and return description.
    fn emit_structured(
        &mut self,
        owner: &str,
        name: &str,
        descriptor: &MemberDescriptor,
        prefix: &str,
    ) -> Result<()> {
        let mut args: Vec<EmittedArg> = Vec::new();

        if owner != self.module && !descriptor.is_static {
            args.push(EmittedArg {
                name: "self".to_string(),
                ty: owner.to_string(),
                comment: None,
            });
        }

        for param in &descriptor.params {
            let ty = self
                .translator
                .translate(param.ty.as_deref())
                .unwrap_or_else(|| UNKNOWN.to_string());
            args.push(EmittedArg {
                name: param.name.clone(),
                ty,
                comment: param.ty.clone(),
            });
        }

        let returns = descriptor
            .declared_type
            .as_deref()
            .filter(|ty| !ty.is_empty())
            .map_or_else(|| UNKNOWN.to_string(), |ty| self.translator.translate_raw(ty));

        let doc = assemble_doc(descriptor, prefix);

        self.write_def(name, &args, &returns, &doc, prefix, descriptor.is_static)
    }

    /// Fallback path: everything we know comes from the docstring prototype.
    /// Recovered argument types are emitted verbatim and staticness is never
    /// guessed.
    fn emit_fallback(&mut self, name: &str, doc: Option<&str>, prefix: &str) -> Result<()> {
        let proto = parse_prototype(name, doc);
        let args: Vec<EmittedArg> = proto
            .args
            .into_iter()
            .map(|arg| EmittedArg {
                name: arg.name,
                ty: arg.ty,
                comment: None,
            })
            .collect();

        self.write_def(&proto.name, &args, &proto.returns, "", prefix, false)
    }

    fn emit_attribute(&mut self, owner: &str, name: &str) -> Result<()> {
        match self.resolve(owner, name) {
            Some(descriptor) => {
                let ty = self
                    .translator
                    .translate(descriptor.declared_type.as_deref())
                    .unwrap_or_else(|| UNKNOWN.to_string());
                match &descriptor.declared_type {
                    Some(raw) => writeln!(self.out, "  {name}: {ty} # {raw}")?,
                    None => writeln!(self.out, "  {name}: {ty}")?,
                }
                if let Some(brief) = &descriptor.brief {
                    writeln!(self.out, "  \"\"\"{brief}\"\"\"")?;
                }
            }
            None => writeln!(self.out, "  {name}: {UNKNOWN}")?,
        }

        writeln!(self.out)?;
        Ok(())
    }

    fn write_def(
        &mut self,
        name: &str,
        args: &[EmittedArg],
        returns: &str,
        doc: &str,
        prefix: &str,
        is_static: bool,
    ) -> Result<()> {
        if is_static {
            writeln!(self.out, "{prefix}@staticmethod")?;
        }

        writeln!(self.out, "{prefix}def {name}(")?;
        for arg in args {
            write!(self.out, "{prefix}  {}: {},", arg.name, arg.ty)?;
            match &arg.comment {
                Some(comment) => writeln!(self.out, " # {comment}")?,
                None => writeln!(self.out)?,
            }
        }
        writeln!(self.out, "\n{prefix}) -> {returns}:")?;

        let doc = doc.trim();
        if !doc.is_empty() {
            writeln!(self.out, "{prefix}  \"\"\"{doc}\"\"\"")?;
        }
        writeln!(self.out, "{prefix}  ...")?;
        writeln!(self.out)?;
        Ok(())
    }
}

/// Concatenates, in order: brief, one labeled line per documented parameter,
/// remarks, return description. Absent pieces are skipped.
fn assemble_doc(descriptor: &MemberDescriptor, prefix: &str) -> String {
    let mut doc = String::new();

    if let Some(brief) = &descriptor.brief {
        doc.push_str(brief);
        doc.push('\n');
    }
    for param in &descriptor.param_docs {
        doc.push_str(&format!("\n{prefix}  :param {}: {}", param.name, param.desc));
    }
    if let Some(remarks) = &descriptor.remarks {
        doc.push_str(&format!("\n{prefix}  {remarks}"));
    }
    if let Some(returns) = &descriptor.return_doc {
        doc.push_str(&format!("\n{prefix}  :return: {returns}"));
    }

    doc
}

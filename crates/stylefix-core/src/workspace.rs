//! Immutable workspace snapshots of projects and documents.
//!
//! A [`Workspace`] is a point-in-time snapshot: it is only ever read once
//! published. Applying a fix produces a *new* snapshot via
//! [`Workspace::with_document_text`]; unaffected projects and documents are
//! shared between snapshots, not copied. "Did anything change" is therefore a
//! pure structural comparison ([`Workspace::text_differs`]).

use crate::types::DocumentId;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Text encoding associated with a document.
///
/// Carried through snapshots so that the surrounding system can persist
/// edited documents with their original encoding. Normalization itself is
/// the concern of the loader, not the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Plain UTF-8.
    Utf8,
    /// UTF-8 with a byte-order mark.
    Utf8Bom,
}

/// A single source document within a project.
///
/// Documents are immutable; an edit produces a new `Document` with the same
/// identity, path and encoding but replaced text.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    path: PathBuf,
    text: Arc<str>,
    encoding: TextEncoding,
}

impl Document {
    /// Creates a new document.
    #[must_use]
    pub fn new(
        id: DocumentId,
        path: impl Into<PathBuf>,
        text: impl Into<Arc<str>>,
        encoding: TextEncoding,
    ) -> Self {
        Self {
            id,
            path: path.into(),
            text: text.into(),
            encoding,
        }
    }

    /// Stable identity of this document.
    #[must_use]
    pub fn id(&self) -> DocumentId {
        self.id
    }

    /// Path relative to the workspace root.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Document text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text encoding of this document on disk.
    #[must_use]
    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    /// Returns a new document with the same identity but replaced text.
    #[must_use]
    pub fn with_text(&self, text: impl Into<Arc<str>>) -> Self {
        Self {
            id: self.id,
            path: self.path.clone(),
            text: text.into(),
            encoding: self.encoding,
        }
    }
}

/// A named unit of compilation owning an ordered collection of documents.
#[derive(Debug, Clone)]
pub struct Project {
    name: String,
    documents: Vec<Arc<Document>>,
}

impl Project {
    /// Creates a new project.
    #[must_use]
    pub fn new(name: impl Into<String>, documents: Vec<Arc<Document>>) -> Self {
        Self {
            name: name.into(),
            documents,
        }
    }

    /// Project name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Documents owned by this project, in declaration order.
    #[must_use]
    pub fn documents(&self) -> &[Arc<Document>] {
        &self.documents
    }

    /// Looks up a document by identity.
    #[must_use]
    pub fn document(&self, id: DocumentId) -> Option<&Arc<Document>> {
        self.documents.iter().find(|d| d.id() == id)
    }
}

/// An immutable snapshot of all projects and documents at a point in time.
#[derive(Debug, Clone)]
pub struct Workspace {
    projects: Vec<Arc<Project>>,
}

impl Workspace {
    /// Creates a workspace from prebuilt projects.
    #[must_use]
    pub fn new(projects: Vec<Arc<Project>>) -> Self {
        Self { projects }
    }

    /// Creates a builder that assigns document identities.
    #[must_use]
    pub fn builder() -> WorkspaceBuilder {
        WorkspaceBuilder::new()
    }

    /// Projects in this snapshot.
    #[must_use]
    pub fn projects(&self) -> &[Arc<Project>] {
        &self.projects
    }

    /// Looks up a document by identity across all projects.
    #[must_use]
    pub fn document(&self, id: DocumentId) -> Option<&Arc<Document>> {
        self.projects.iter().find_map(|p| p.document(id))
    }

    /// Iterates over all documents in all projects.
    pub fn documents(&self) -> impl Iterator<Item = &Arc<Document>> {
        self.projects.iter().flat_map(|p| p.documents().iter())
    }

    /// Produces a new snapshot with one document's text replaced.
    ///
    /// The document keeps its identity, path and encoding. Projects that do
    /// not contain the document are shared with the old snapshot. If the id
    /// is unknown the snapshot is returned unchanged.
    #[must_use]
    pub fn with_document_text(&self, id: DocumentId, text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let projects = self
            .projects
            .iter()
            .map(|project| {
                if project.document(id).is_none() {
                    return Arc::clone(project);
                }
                let documents = project
                    .documents()
                    .iter()
                    .map(|doc| {
                        if doc.id() == id {
                            Arc::new(doc.with_text(Arc::clone(&text)))
                        } else {
                            Arc::clone(doc)
                        }
                    })
                    .collect();
                Arc::new(Project::new(project.name(), documents))
            })
            .collect();
        Self { projects }
    }

    /// Returns the identities of documents whose text differs from `other`.
    ///
    /// Documents are matched by identity; a document present in only one
    /// snapshot is not reported.
    #[must_use]
    pub fn changed_documents(&self, other: &Workspace) -> Vec<DocumentId> {
        self.documents()
            .filter_map(|doc| {
                let counterpart = other.document(doc.id())?;
                (doc.text() != counterpart.text()).then(|| doc.id())
            })
            .collect()
    }

    /// Returns `true` if any document's text differs from `other`.
    #[must_use]
    pub fn text_differs(&self, other: &Workspace) -> bool {
        !self.changed_documents(other).is_empty()
    }
}

/// Builder for constructing an initial [`Workspace`] snapshot.
///
/// Assigns sequential [`DocumentId`]s as documents are added.
#[derive(Debug, Default)]
pub struct WorkspaceBuilder {
    projects: Vec<Project>,
    next_id: u64,
}

impl WorkspaceBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new project; subsequent documents are added to it.
    #[must_use]
    pub fn project(mut self, name: impl Into<String>) -> Self {
        self.projects.push(Project::new(name, Vec::new()));
        self
    }

    /// Adds a UTF-8 document to the current project.
    ///
    /// # Panics
    ///
    /// Panics if no project has been started.
    #[must_use]
    pub fn document(self, path: impl Into<PathBuf>, text: impl Into<Arc<str>>) -> Self {
        self.document_with_encoding(path, text, TextEncoding::Utf8)
    }

    /// Adds a document with an explicit encoding to the current project.
    ///
    /// # Panics
    ///
    /// Panics if no project has been started.
    #[must_use]
    pub fn document_with_encoding(
        mut self,
        path: impl Into<PathBuf>,
        text: impl Into<Arc<str>>,
        encoding: TextEncoding,
    ) -> Self {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        let doc = Arc::new(Document::new(id, path, text, encoding));
        let project = self
            .projects
            .last_mut()
            .expect("document added before any project");
        project.documents.push(doc);
        self
    }

    /// Builds the workspace snapshot.
    #[must_use]
    pub fn build(self) -> Workspace {
        Workspace::new(self.projects.into_iter().map(Arc::new).collect())
    }
}

//! Rendering of a finished model into the model and atoms documents.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::info;

use crate::atoms::AtomTable;
use crate::builder::SimplicialModel;
use crate::error::{ModelError, Result};
use crate::types::PointId;

/// One entry of the model document's `simplexes` list.
#[derive(Debug, Serialize)]
pub struct SimplexEntry<'a> {
    pub id: String,
    pub points: &'a [PointId],
    pub atoms: Vec<&'a str>,
}

/// The model document consumed by the spatial model checker.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDocument<'a> {
    pub number_of_points: usize,
    pub coordinates_of_points: Vec<[f64; 3]>,
    pub atom_names: &'a [String],
    pub simplexes: Vec<SimplexEntry<'a>>,
}

impl<'a> ModelDocument<'a> {
    pub fn new(model: &'a SimplicialModel) -> Self {
        info!("encoding the model");

        info!("saving the coordinates of points");
        let coordinates_of_points = model.points().iter().map(|p| p.to_array()).collect();

        info!("saving the atom names");
        let atom_names = model.atoms().names();

        info!(count = model.simplices().len(), "saving the simplexes");
        let simplexes = model
            .simplices()
            .iter()
            .enumerate()
            .map(|(id, simplex)| SimplexEntry {
                id: format!("s{id}"),
                points: simplex.as_slice(),
                atoms: model.atoms_of(id),
            })
            .collect();

        Self {
            number_of_points: model.layout().point_count(),
            coordinates_of_points,
            atom_names,
            simplexes,
        }
    }
}

/// Both documents rendered to JSON text.
#[derive(Clone, Debug)]
pub struct RenderedDocuments {
    pub model: String,
    pub atoms: String,
}

/// Destination files for the two documents.
#[derive(Clone, Debug)]
pub struct OutputPaths {
    pub model: PathBuf,
    pub atoms: PathBuf,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            model: PathBuf::from("treeModel.json"),
            atoms: PathBuf::from("treeAtoms.json"),
        }
    }
}

pub fn render_model(model: &SimplicialModel) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ModelDocument::new(model))?)
}

pub fn render_atoms(atoms: &AtomTable) -> Result<String> {
    Ok(serde_json::to_string_pretty(atoms)?)
}

pub fn render(model: &SimplicialModel) -> Result<RenderedDocuments> {
    let rendered = RenderedDocuments {
        model: render_model(model)?,
        atoms: render_atoms(model.atoms())?,
    };
    info!("model encoded successfully");
    Ok(rendered)
}

/// Writes both documents, or neither.
///
/// The documents are rendered in memory and written to temporary files next
/// to their destinations. Destinations that are directories are refused
/// before anything is replaced. An existing model document is moved aside
/// while the new pair is renamed into place; if the atoms rename then fails,
/// the new model document is removed and the old one restored.
///
/// ### Errors
/// [`ModelError::Io`] naming the file that could not be written.
pub fn write_documents(model: &SimplicialModel, paths: &OutputPaths) -> Result<()> {
    let rendered = render(model)?;

    let model_tmp = temp_path(&paths.model);
    let atoms_tmp = temp_path(&paths.atoms);

    let staged = check_destination(&paths.model)
        .and_then(|()| check_destination(&paths.atoms))
        .and_then(|()| write_file(&model_tmp, &rendered.model))
        .and_then(|()| write_file(&atoms_tmp, &rendered.atoms))
        .and_then(|()| commit(&model_tmp, &atoms_tmp, paths));

    if staged.is_err() {
        let _ = fs::remove_file(&model_tmp);
        let _ = fs::remove_file(&atoms_tmp);
    } else {
        info!(
            model = %paths.model.display(),
            atoms = %paths.atoms.display(),
            "documents written"
        );
    }
    staged
}

/// Renames both staged files into place, undoing the model rename if the
/// atoms rename fails.
fn commit(model_tmp: &Path, atoms_tmp: &Path, paths: &OutputPaths) -> Result<()> {
    let backup = backup_path(&paths.model);
    let had_model = paths.model.exists();
    if had_model {
        rename(&paths.model, &backup)?;
    }

    if let Err(err) = rename(model_tmp, &paths.model) {
        if had_model {
            let _ = fs::rename(&backup, &paths.model);
        }
        return Err(err);
    }

    if let Err(err) = rename(atoms_tmp, &paths.atoms) {
        let _ = fs::remove_file(&paths.model);
        if had_model {
            let _ = fs::rename(&backup, &paths.model);
        }
        return Err(err);
    }

    if had_model {
        let _ = fs::remove_file(&backup);
    }
    Ok(())
}

fn check_destination(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(ModelError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::other("destination is a directory"),
        });
    }
    Ok(())
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".bak");
    path.with_file_name(name)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_file(path: &Path, text: &str) -> Result<()> {
    let io = |source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = fs::File::create(path).map_err(io)?;
    file.write_all(text.as_bytes()).map_err(io)?;
    file.sync_all().map_err(io)
}

fn rename(from: &Path, to: &Path) -> Result<()> {
    fs::rename(from, to).map_err(|source| ModelError::Io {
        path: to.to_path_buf(),
        source,
    })
}

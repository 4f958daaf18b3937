use crate::taxonomy::{CollisionPolicy, SlugMode};
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// The name of the project file searched for by [`Config::from_directory`].
pub const PROJECT_FILE: &str = "pagewright.yaml";

#[derive(Deserialize)]
struct PageSize(NonZeroUsize);
impl Default for PageSize {
    fn default() -> Self {
        PageSize(DEFAULT_PAGE_SIZE)
    }
}

const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => unreachable!(),
};

fn default_content() -> PathBuf {
    PathBuf::from("content.yaml")
}

fn default_base_path() -> String {
    String::from("pages")
}

fn default_path_prefix() -> String {
    String::from("/")
}

fn default_categories_prefix() -> String {
    String::from("/categories")
}

fn default_tags_prefix() -> String {
    String::from("/tags")
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Project {
    #[serde(default = "default_content")]
    content: PathBuf,

    #[serde(default = "default_base_path")]
    base_path: String,

    #[serde(default)]
    page_size: PageSize,

    #[serde(default = "default_path_prefix")]
    path_prefix: String,

    #[serde(default = "default_categories_prefix")]
    categories_prefix: String,

    #[serde(default = "default_tags_prefix")]
    tags_prefix: String,

    #[serde(default)]
    collision_policy: CollisionPolicy,

    #[serde(default)]
    slug_mode: SlugMode,

    #[serde(default)]
    taxonomy_overview: bool,
}

/// Settings for one build.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// The content manifest read by the command line tool.
    pub content: PathBuf,

    /// Storage paths are resolved to slugs relative to this path.
    pub base_path: String,

    /// Posts per archive page.
    pub page_size: NonZeroUsize,

    /// Where the archive lives; the first page is at the bare prefix.
    pub path_prefix: String,

    pub categories_prefix: String,
    pub tags_prefix: String,
    pub collision_policy: CollisionPolicy,
    pub slug_mode: SlugMode,

    /// Emit the category and tag overview pages.
    pub taxonomy_overview: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            content: default_content(),
            base_path: default_base_path(),
            page_size: DEFAULT_PAGE_SIZE,
            path_prefix: default_path_prefix(),
            categories_prefix: default_categories_prefix(),
            tags_prefix: default_tags_prefix(),
            collision_policy: CollisionPolicy::default(),
            slug_mode: SlugMode::default(),
            taxonomy_overview: false,
        }
    }
}

impl Config {
    /// Loads the project file from `dir` or the nearest ancestor that has one.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = Config::find_project_file(dir).ok_or_else(|| {
            anyhow!(
                "Could not find `{}` in any parent directory",
                PROJECT_FILE
            )
        })?;
        Config::from_project_file(&path)
            .with_context(|| format!("Loading configuration `{}`", path.display()))
    }

    /// Returns the project file in `dir` or the nearest ancestor that has one.
    pub fn find_project_file(dir: &Path) -> Option<PathBuf> {
        dir.ancestors()
            .map(|ancestor| ancestor.join(PROJECT_FILE))
            .find(|path| path.exists())
    }

    /// Loads a project file. The `content` path is taken relative to the
    /// file's directory.
    pub fn from_project_file(path: &Path) -> Result<Config> {
        use crate::util::open;
        let project: Project = serde_yaml::from_reader(open(path, "project")?)?;
        let project_root = path.parent().ok_or_else(|| {
            anyhow!(
                "Can't get parent directory for provided project file path '{:?}'",
                path
            )
        })?;
        Ok(Config {
            content: project_root.join(project.content),
            base_path: project.base_path,
            page_size: project.page_size.0,
            path_prefix: project.path_prefix,
            categories_prefix: project.categories_prefix,
            tags_prefix: project.tags_prefix,
            collision_policy: project.collision_policy,
            slug_mode: project.slug_mode,
            taxonomy_overview: project.taxonomy_overview,
        })
    }
}

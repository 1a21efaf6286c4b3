//! In-memory z/OS UNIX file tree.

use std::collections::BTreeMap;

use crate::error::{NativeError, NativeResult};

use super::content_etag;

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeKind {
    File(String),
    Directory,
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    mode: String,
    owner: String,
    tag: Option<String>,
}

impl Node {
    fn directory(mode: &str, owner: &str) -> Self {
        Self {
            kind: NodeKind::Directory,
            mode: mode.to_string(),
            owner: owner.to_string(),
            tag: None,
        }
    }

    fn is_dir(&self) -> bool {
        self.kind == NodeKind::Directory
    }
}

/// File tree keyed by normalized absolute path.
#[derive(Debug)]
pub(crate) struct UssTree {
    nodes: BTreeMap<String, Node>,
}

/// Strip redundant slashes; the root stays `/`.
fn normalize(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').filter(|p| !p.is_empty() && *p != ".").collect();
    format!("/{}", parts.join("/"))
}

fn parent_of(path: &str) -> Option<&str> {
    if path == "/" {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some("/"),
        Some(idx) => Some(&path[..idx]),
        None => None,
    }
}

fn child_prefix(dir: &str) -> String {
    if dir == "/" {
        "/".to_string()
    } else {
        format!("{dir}/")
    }
}

fn validate_mode(mode: &str) -> NativeResult<()> {
    if mode.len() == 3 && mode.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
        Ok(())
    } else {
        Err(NativeError::Invalid(format!("invalid permission mode '{mode}'")))
    }
}

impl UssTree {
    /// Tree with `/`, `/tmp`, `/u` and a home directory for `user`.
    pub(crate) fn new(user: &str) -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::directory("755", "OMVSKERN"));
        nodes.insert("/tmp".to_string(), Node::directory("777", "OMVSKERN"));
        nodes.insert("/u".to_string(), Node::directory("755", "OMVSKERN"));
        nodes.insert(
            format!("/u/{}", user.to_ascii_lowercase()),
            Node::directory("755", user),
        );
        Self { nodes }
    }

    fn node(&self, path: &str) -> NativeResult<&Node> {
        self.nodes
            .get(path)
            .ok_or_else(|| NativeError::not_found("path", path))
    }

    /// Paths strictly below `dir`, in sorted order.
    fn descendants(&self, dir: &str) -> Vec<String> {
        let prefix = child_prefix(dir);
        self.nodes
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter(|(key, _)| key.as_str() != dir)
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Newline-delimited names of the entries of a directory.
    ///
    /// Listing a file yields the file's own name.
    pub(crate) fn list(&self, path: &str) -> NativeResult<String> {
        let path = normalize(path);
        let node = self.node(&path)?;
        if !node.is_dir() {
            let name = path.rsplit('/').next().unwrap_or_default();
            return Ok(format!("{name}\n"));
        }

        let prefix = child_prefix(&path);
        let mut listing = String::from(".\n..\n");
        for child in self.descendants(&path) {
            let name = &child[prefix.len()..];
            if !name.contains('/') {
                listing.push_str(name);
                listing.push('\n');
            }
        }
        Ok(listing)
    }

    pub(crate) fn read(&self, path: &str) -> NativeResult<String> {
        let path = normalize(path);
        match &self.node(&path)?.kind {
            NodeKind::File(data) => Ok(data.clone()),
            NodeKind::Directory => Err(NativeError::Invalid(format!(
                "'{path}' is a directory"
            ))),
        }
    }

    /// Write a file, creating it with mode 644 when absent.
    pub(crate) fn write(
        &mut self,
        path: &str,
        data: &str,
        etag: &str,
        owner: &str,
    ) -> NativeResult<String> {
        let path = normalize(path);
        if !self.nodes.contains_key(&path) {
            self.create_file(&path, "644", owner)?;
        }
        let node = self
            .nodes
            .get_mut(&path)
            .ok_or_else(|| NativeError::not_found("path", path.clone()))?;
        let NodeKind::File(contents) = &mut node.kind else {
            return Err(NativeError::Invalid(format!("'{path}' is a directory")));
        };

        if !etag.is_empty() {
            let current = content_etag(contents);
            if current != etag {
                return Err(NativeError::EtagMismatch {
                    name: path,
                    expected: etag.to_string(),
                    actual: current,
                });
            }
        }

        *contents = data.to_string();
        Ok(content_etag(data))
    }

    pub(crate) fn create_file(&mut self, path: &str, mode: &str, owner: &str) -> NativeResult<()> {
        self.insert(path, NodeKind::File(String::new()), mode, owner)
    }

    pub(crate) fn create_dir(&mut self, path: &str, mode: &str, owner: &str) -> NativeResult<()> {
        self.insert(path, NodeKind::Directory, mode, owner)
    }

    fn insert(&mut self, path: &str, kind: NodeKind, mode: &str, owner: &str) -> NativeResult<()> {
        validate_mode(mode)?;
        let path = normalize(path);
        if self.nodes.contains_key(&path) {
            return Err(NativeError::already_exists("path", path));
        }
        let parent = parent_of(&path).unwrap_or("/");
        match self.nodes.get(parent) {
            Some(node) if node.is_dir() => {}
            Some(_) => {
                return Err(NativeError::Invalid(format!("'{parent}' is not a directory")))
            }
            None => return Err(NativeError::not_found("path", parent)),
        }
        self.nodes.insert(
            path,
            Node {
                kind,
                mode: mode.to_string(),
                owner: owner.to_string(),
                tag: None,
            },
        );
        Ok(())
    }

    pub(crate) fn delete(&mut self, path: &str, recursive: bool) -> NativeResult<()> {
        let path = normalize(path);
        if path == "/" {
            return Err(NativeError::Invalid("cannot delete the root directory".to_string()));
        }
        self.node(&path)?;
        let below = self.descendants(&path);
        if !below.is_empty() && !recursive {
            return Err(NativeError::Invalid(format!("directory not empty: {path}")));
        }
        for child in below {
            self.nodes.remove(&child);
        }
        self.nodes.remove(&path);
        Ok(())
    }

    pub(crate) fn chmod(&mut self, path: &str, mode: &str, recursive: bool) -> NativeResult<()> {
        validate_mode(mode)?;
        self.update(path, recursive, |node| node.mode = mode.to_string())
    }

    pub(crate) fn chown(&mut self, path: &str, owner: &str, recursive: bool) -> NativeResult<()> {
        if owner.trim().is_empty() {
            return Err(NativeError::Invalid("owner cannot be empty".to_string()));
        }
        self.update(path, recursive, |node| node.owner = owner.to_string())
    }

    pub(crate) fn chtag(&mut self, path: &str, tag: &str, recursive: bool) -> NativeResult<()> {
        self.update(path, recursive, |node| {
            if !node.is_dir() {
                node.tag = Some(tag.to_string());
            }
        })
    }

    fn update(
        &mut self,
        path: &str,
        recursive: bool,
        apply: impl Fn(&mut Node),
    ) -> NativeResult<()> {
        let path = normalize(path);
        self.node(&path)?;
        let mut targets = vec![path.clone()];
        if recursive {
            targets.extend(self.descendants(&path));
        }
        for target in targets {
            if let Some(node) = self.nodes.get_mut(&target) {
                apply(node);
            }
        }
        Ok(())
    }

    #[cfg(test)]
    fn describe(&self, path: &str) -> Option<(String, String, Option<String>)> {
        self.nodes
            .get(path)
            .map(|n| (n.mode.clone(), n.owner.clone(), n.tag.clone()))
    }
}

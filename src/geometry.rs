//! Mesh intake sanitization for decoration geometry.
//!
//! Category meshes come from an external geometry-construction step and
//! occasionally arrive broken: no positions, short normal/uv arrays,
//! indices past the vertex count. A bad mesh must never take the batch
//! down — it gets patched to something drawable (at worst a degenerate
//! placeholder) and the whole pass emits ONE aggregated warning, not a
//! log line per defect.

/// CPU-side mesh payload handed to the upload layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex normals; patched to match `positions` in length.
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex texture coordinates; patched to match `positions`.
    pub uvs: Vec<[f32; 2]>,
    /// Triangle list indices into `positions`.
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Vertex count.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Triangle count.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Backfill normal for patched vertices: straight up.
const PATCH_NORMAL: [f32; 3] = [0.0, 1.0, 0.0];

/// Example labels kept in the aggregated warning.
const MAX_EXAMPLES: usize = 4;

/// Tally of patches applied across one sanitize pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchReport {
    /// Meshes that needed at least one patch.
    pub meshes_patched: usize,
    /// Meshes with no positions at all, replaced by the placeholder.
    pub missing_positions: usize,
    /// Normal entries filled in to match the vertex count.
    pub backfilled_normals: usize,
    /// UV entries filled in to match the vertex count.
    pub backfilled_uvs: usize,
    /// Triangles dropped for referencing vertices out of range.
    pub dropped_triangles: usize,
    /// Trailing indices removed from an unterminated final triangle.
    pub truncated_indices: usize,
    /// Up to [`MAX_EXAMPLES`] labels of patched meshes.
    pub examples: Vec<String>,
}

impl PatchReport {
    /// Whether the pass saw only well-formed meshes.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.meshes_patched == 0
    }
}

/// Sanitizes a batch of category meshes, accumulating one report.
///
/// Run every mesh of a load pass through [`sanitize`](Self::sanitize),
/// then call [`finish`](Self::finish) — that is where the single
/// aggregated warning is emitted.
#[derive(Debug, Default)]
pub struct MeshSanitizer {
    report: PatchReport,
}

impl MeshSanitizer {
    /// A sanitizer with an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch `mesh` in place. Returns whether anything was patched.
    pub fn sanitize(&mut self, label: &str, mesh: &mut MeshData) -> bool {
        let before = self.report.clone();

        if mesh.positions.is_empty() {
            // Nothing usable: a degenerate zero-area triangle keeps the
            // downstream vertex buffer non-empty and draws no pixels.
            mesh.positions = vec![[0.0; 3]; 3];
            mesh.normals = vec![PATCH_NORMAL; 3];
            mesh.uvs = vec![[0.0; 2]; 3];
            mesh.indices = vec![0, 1, 2];
            self.report.missing_positions += 1;
        } else {
            self.patch_vertex_streams(mesh);
            self.patch_indices(mesh);
        }

        let patched = self.report != before;
        if patched {
            self.report.meshes_patched += 1;
            if self.report.examples.len() < MAX_EXAMPLES {
                self.report.examples.push(label.to_owned());
            }
        }
        patched
    }

    /// Close the pass. Logs the aggregated warning if anything was
    /// patched, and returns the report.
    #[must_use]
    pub fn finish(self) -> PatchReport {
        let r = &self.report;
        if !r.is_clean() {
            log::warn!(
                "patched {} malformed mesh(es) (e.g. {:?}): {} empty, \
                 {} normals / {} uvs backfilled, {} triangle(s) dropped, \
                 {} trailing index(es) truncated",
                r.meshes_patched,
                r.examples,
                r.missing_positions,
                r.backfilled_normals,
                r.backfilled_uvs,
                r.dropped_triangles,
                r.truncated_indices,
            );
        }
        self.report
    }

    /// Bring normals and uvs to the vertex count.
    fn patch_vertex_streams(&mut self, mesh: &mut MeshData) {
        let n = mesh.positions.len();
        if mesh.normals.len() != n {
            self.report.backfilled_normals +=
                n.saturating_sub(mesh.normals.len());
            mesh.normals.resize(n, PATCH_NORMAL);
        }
        if mesh.uvs.len() != n {
            self.report.backfilled_uvs += n.saturating_sub(mesh.uvs.len());
            mesh.uvs.resize(n, [0.0; 2]);
        }
    }

    /// Truncate an unterminated triangle and drop out-of-range triples.
    fn patch_indices(&mut self, mesh: &mut MeshData) {
        let tail = mesh.indices.len() % 3;
        if tail != 0 {
            mesh.indices.truncate(mesh.indices.len() - tail);
            self.report.truncated_indices += tail;
        }

        let n = mesh.positions.len() as u32;
        let before = mesh.indices.len();
        let mut kept = Vec::with_capacity(before);
        for tri in mesh.indices.chunks_exact(3) {
            if tri.iter().all(|&i| i < n) {
                kept.extend_from_slice(tri);
            }
        }
        if kept.len() != before {
            self.report.dropped_triangles += (before - kept.len()) / 3;
            mesh.indices = kept;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshData {
        MeshData {
            positions: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            normals: vec![[0.0, 0.0, 1.0]; 4],
            uvs: vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    #[test]
    fn clean_mesh_passes_untouched() {
        let mut sanitizer = MeshSanitizer::new();
        let mut mesh = quad();
        let original = mesh.clone();
        assert!(!sanitizer.sanitize("flower_petal", &mut mesh));
        assert_eq!(mesh, original);
        let report = sanitizer.finish();
        assert!(report.is_clean());
        assert!(report.examples.is_empty());
    }

    #[test]
    fn empty_mesh_becomes_placeholder_triangle() {
        let mut sanitizer = MeshSanitizer::new();
        let mut mesh = MeshData::default();
        assert!(sanitizer.sanitize("berry_cluster", &mut mesh));
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.normals, vec![PATCH_NORMAL; 3]);

        let report = sanitizer.finish();
        assert_eq!(report.missing_positions, 1);
        assert_eq!(report.meshes_patched, 1);
        assert_eq!(report.examples, vec!["berry_cluster".to_owned()]);
    }

    #[test]
    fn short_streams_are_backfilled() {
        let mut sanitizer = MeshSanitizer::new();
        let mut mesh = quad();
        mesh.normals.truncate(1);
        mesh.uvs.clear();
        assert!(sanitizer.sanitize("lantern_glass", &mut mesh));
        assert_eq!(mesh.normals.len(), 4);
        assert_eq!(mesh.normals[3], PATCH_NORMAL);
        assert_eq!(mesh.uvs.len(), 4);

        let report = sanitizer.finish();
        assert_eq!(report.backfilled_normals, 3);
        assert_eq!(report.backfilled_uvs, 4);
    }

    #[test]
    fn out_of_range_triangles_are_dropped_whole() {
        let mut sanitizer = MeshSanitizer::new();
        let mut mesh = quad();
        mesh.indices = vec![0, 1, 2, 1, 2, 99];
        assert!(sanitizer.sanitize("grass_blade", &mut mesh));
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(sanitizer.finish().dropped_triangles, 1);
    }

    #[test]
    fn unterminated_triangle_is_truncated() {
        let mut sanitizer = MeshSanitizer::new();
        let mut mesh = quad();
        mesh.indices = vec![0, 1, 2, 3, 0];
        assert!(sanitizer.sanitize("puff_dome", &mut mesh));
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(sanitizer.finish().truncated_indices, 2);
    }

    #[test]
    fn report_aggregates_across_meshes_and_caps_examples() {
        let mut sanitizer = MeshSanitizer::new();
        for i in 0..6 {
            let mut mesh = MeshData::default();
            let label = format!("mesh_{i}");
            assert!(sanitizer.sanitize(&label, &mut mesh));
        }
        let report = sanitizer.finish();
        assert_eq!(report.meshes_patched, 6);
        assert_eq!(report.missing_positions, 6);
        // Examples stay bounded no matter how bad the batch was.
        assert_eq!(report.examples.len(), MAX_EXAMPLES);
        assert_eq!(report.examples[0], "mesh_0");
    }
}

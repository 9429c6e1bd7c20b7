use sp_core::{MICRO_DEGREES, VertexId};

/// Parse a 1-based vertex id as printed in DIMACS files.
pub fn parse_vertex(input: &str) -> Result<VertexId, String> {
    let id: u64 = input.trim().parse().map_err(|e| format!("invalid vertex id {input:?}: {e}"))?;
    VertexId::from_one_based(id).ok_or_else(|| format!("vertex ids start at 1, got {id}"))
}

/// Parse a radius in degrees into micro-degrees.  Must lie in (0, 90].
pub fn parse_radius(input: &str) -> Result<i32, String> {
    let degrees: f64 = input.trim().parse().map_err(|e| format!("invalid radius {input:?}: {e}"))?;
    if !(degrees > 0.0 && degrees <= 90.0) {
        return Err(format!("radius must be in (0, 90] degrees, got {degrees}"));
    }
    Ok((degrees * MICRO_DEGREES).round() as i32)
}

use super::Output;
use crate::schema::ExtensionType;
use crate::types::wrapper_name;

pub const EXTENSION_DISPATCH_SIGNATURE: &str =
    "private object GetExtensionType(MessagePackExtendedTypeObject msgPackExtObj)";

/// Emit the wire tag -> wrapper constructor switch, ordered by tag.
///
/// The generated `default` arm throws: an unknown tag cannot be represented.
pub fn render_extension_dispatch(
    types: &[ExtensionType],
    wrapper_prefix: &str,
    output: &mut Output,
    level: usize,
) {
    let mut by_tag: Vec<&ExtensionType> = types.iter().collect();
    by_tag.sort_by_key(|ty| ty.id);

    output.line(level, EXTENSION_DISPATCH_SIGNATURE);
    output.open(level);
    output.line(level + 1, "switch (msgPackExtObj.TypeCode)");
    output.open(level + 1);
    for ty in by_tag {
        output.line(level + 2, &format!("case {}:", ty.id));
        output.line(
            level + 3,
            &format!(
                "return new {}(this, msgPackExtObj);",
                wrapper_name(wrapper_prefix, &ty.name)
            ),
        );
    }
    output.line(level + 2, "default:");
    output.line(level + 3, "throw new SerializationException(");
    output.line(
        level + 4,
        "$\"Unknown extension type id {msgPackExtObj.TypeCode}\");",
    );
    output.close(level + 1, "");
    output.close(level, "");
}

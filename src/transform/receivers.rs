use crate::error::GenerateError;
use crate::schema::{ExtensionType, Function};

/// Extension type together with the instance methods that belong to it
#[derive(Debug, Clone)]
pub struct WrapperPlan<'a> {
    pub ty: &'a ExtensionType,
    pub methods: Vec<&'a Function>,
}

/// Split functions into top-level stubs and per-type instance methods.
///
/// A `method` function must start with exactly one extension type's prefix.
pub fn resolve<'a>(
    functions: &[&'a Function],
    types: &'a [ExtensionType],
) -> Result<(Vec<&'a Function>, Vec<WrapperPlan<'a>>), GenerateError> {
    let mut top_level = Vec::new();
    let mut wrappers: Vec<WrapperPlan<'a>> = types
        .iter()
        .map(|ty| WrapperPlan {
            ty,
            methods: Vec::new(),
        })
        .collect();

    for &function in functions {
        if !function.is_method {
            top_level.push(function);
            continue;
        }

        let matches: Vec<usize> = types
            .iter()
            .enumerate()
            .filter(|(_, ty)| function.name.starts_with(&ty.prefix))
            .map(|(index, _)| index)
            .collect();

        match matches.as_slice() {
            [index] => wrappers[*index].methods.push(function),
            _ => {
                return Err(GenerateError::AmbiguousReceiver {
                    function: function.name.clone(),
                    candidates: matches.iter().map(|&i| types[i].name.clone()).collect(),
                });
            }
        }
    }

    Ok((top_level, wrappers))
}

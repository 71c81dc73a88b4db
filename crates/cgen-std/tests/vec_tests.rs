use super::*;
use cgen_ir::{SourceCode, generate};

fn instance(element: Type) -> VecInstance {
    VecInstance::instantiate(element).unwrap()
}

#[test]
fn test_struct_layout() {
    let vec = instance(primitives::int32());
    assert_eq!(vec.def().mangled_name(), "Vec__int32_t");
    assert_eq!(
        generate(vec.def().as_ref()),
        "struct Vec__int32_t {\n  int32_t *buf;\n  size_t len;\n  size_t cap;\n};"
    );
}

#[test]
fn test_function_names_follow_the_element_type() {
    let vec = instance(Type::pointer(primitives::char()));
    let names: Vec<_> = [
        vec.constructor(),
        vec.destructor(),
        vec.reserve(),
        vec.push(),
        vec.get(),
    ]
    .iter()
    .map(|function| function.mangled_name())
    .collect();
    assert_eq!(
        names,
        [
            "vec_new__ptr_char",
            "vec_drop__ptr_char",
            "vec_reserve__ptr_char",
            "vec_push__ptr_char",
            "vec_get__ptr_char",
        ]
    );
}

#[test]
fn test_two_element_types_share_a_unit() {
    let ints = instance(primitives::int32());
    let strings = instance(Type::pointer(primitives::char()));
    let mut unit = SourceCode::new();
    unit.add(&ints);
    unit.add(&strings);

    assert_eq!(unit.includes().count(), 2);
    let structs: Vec<_> = unit.structs().iter().map(|def| def.mangled_name()).collect();
    assert_eq!(structs, ["Vec__int32_t", "Vec__ptr_char"]);
    assert_eq!(unit.functions().len(), 10);
}

#[test]
fn test_constructor_body() {
    let vec = instance(primitives::int32());
    assert_eq!(
        generate(vec.constructor()),
        "\
struct Vec__int32_t vec_new__int32_t() {
  struct Vec__int32_t v;
  v.buf = NULL;
  v.len = 0;
  v.cap = 0;
  return v;
}"
    );
}

#[test]
fn test_push_grows_before_writing() {
    let vec = instance(primitives::int32());
    assert_eq!(
        generate(vec.push()),
        "\
void vec_push__int32_t(struct Vec__int32_t *v, int32_t element) {
  if ((v->len) == (v->cap)) {
    size_t cap;
    if ((v->cap) == (0)) {
      cap = 8;
    } else {
      cap = (v->cap) << (1);
    }
    vec_reserve__int32_t(v, cap);
  }
  v->buf[v->len] = element;
  v->len = (v->len) + (1);
}"
    );
}

#[test]
fn test_reserve_reallocates_by_element_size() {
    let vec = instance(primitives::uint8());
    assert_eq!(
        generate(vec.reserve()),
        "\
void vec_reserve__uint8_t(struct Vec__uint8_t *v, size_t cap) {
  if ((cap) > (v->cap)) {
    v->buf = realloc(v->buf, (sizeof(uint8_t)) * (cap));
    assert((v->buf) != (NULL));
    v->cap = cap;
  }
}"
    );
}

#[test]
fn test_get_returns_element_type() {
    let vec = instance(primitives::int64());
    assert_eq!(vec.get().return_type(), &primitives::int64());
    assert_eq!(
        generate(vec.get()),
        "\
int64_t vec_get__int64_t(struct Vec__int64_t *v, size_t index) {
  assert((index) < (v->len));
  return v->buf[index];
}"
    );
}

#[test]
fn test_registry_memoizes_per_element() {
    let mut registry = VecRegistry::new();
    let first = registry.instance(&primitives::int32()).unwrap();
    let again = registry.instance(&primitives::int32()).unwrap();
    let other = registry.instance(&primitives::uint8()).unwrap();

    assert!(Rc::ptr_eq(&first, &again));
    assert!(!Rc::ptr_eq(&first, &other));
    assert_eq!(registry.len(), 2);
    assert_eq!(first.ty(), again.ty());

    let mut unit = SourceCode::new();
    unit.add(&registry);
    let structs: Vec<_> = unit.structs().iter().map(|def| def.mangled_name()).collect();
    assert_eq!(structs, ["Vec__int32_t", "Vec__uint8_t"]);
}

#[test]
fn test_separate_instantiations_are_distinct_types() {
    let a = instance(primitives::int32());
    let b = instance(primitives::int32());
    assert_ne!(a.ty(), b.ty());

    let mut unit = SourceCode::new();
    unit.add(&a);
    unit.add(&b);
    assert_eq!(unit.structs().len(), 1);
    assert_eq!(unit.functions().len(), 5);
}

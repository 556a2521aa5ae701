//! Constant GraphQL documents for the three read operations

/// A named, side-effect-free query document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryDescriptor {
    pub operation_name: &'static str,
    pub document: &'static str,
}

pub const LIST_CATEGORIES: QueryDescriptor = QueryDescriptor {
    operation_name: "ListCategories",
    document: r#"query ListCategories {
  categories: factCategories {
    id
    name
  }
}"#,
};

pub const LIST_FACTS: QueryDescriptor = QueryDescriptor {
    operation_name: "ListFacts",
    document: r#"query ListFacts($where: JSON) {
  facts(where: $where) {
    id
    text
    categories {
      id
      name
    }
    research {
      id
    }
  }
}"#,
};

pub const GET_FACT: QueryDescriptor = QueryDescriptor {
    operation_name: "GetFact",
    document: r#"query GetFact($id: ID!) {
  fact(id: $id) {
    id
    text
    updated_at
    categories {
      id
      name
    }
    research {
      id
      title
      url
      description
      citation
      updated_at
    }
  }
}"#,
};

//! Read-only aggregations over a social graph.
//!
//! Everything here goes through the public `Digraph` contract and never
//! mutates. Rankings break ties by ascending id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::graph::Digraph;
use crate::model::{InterestId, Relationship, Tag, User, UserId};
use crate::Result;

/// Headline numbers for a graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub users: usize,
    pub relationships: usize,
    pub added: usize,
    pub included: usize,
    pub most_out_degree: Option<(UserId, usize)>,
    pub most_shared_interest: Option<(InterestId, usize)>,
}

pub fn summary<G>(graph: &G) -> Result<Summary>
where
    G: Digraph<User, Relationship>,
{
    Ok(Summary {
        users: graph.vertex_count(),
        relationships: graph.edge_count(),
        added: added_count(graph)?,
        included: included_count(graph)?,
        most_out_degree: most_out_degree(graph)?,
        most_shared_interest: most_shared_interest(graph)?,
    })
}

fn count_tag<G>(graph: &G, tag: Tag) -> Result<usize>
where
    G: Digraph<User, Relationship>,
{
    let mut n = 0;
    for v in graph.vertices() {
        if graph.element(v)?.tag == tag {
            n += 1;
        }
    }
    Ok(n)
}

pub fn added_count<G>(graph: &G) -> Result<usize>
where
    G: Digraph<User, Relationship>,
{
    count_tag(graph, Tag::Added)
}

pub fn included_count<G>(graph: &G) -> Result<usize>
where
    G: Digraph<User, Relationship>,
{
    count_tag(graph, Tag::Included)
}

/// Users still `Included`, grouped by the added user that pulled them in.
pub fn included_by_added<G>(graph: &G) -> Result<BTreeMap<UserId, Vec<UserId>>>
where
    G: Digraph<User, Relationship>,
{
    let mut groups: BTreeMap<UserId, Vec<UserId>> = BTreeMap::new();
    for v in graph.vertices() {
        let user = graph.element(v)?;
        if let (Tag::Included, Some(by)) = (user.tag, user.included_by) {
            groups.entry(by).or_default().push(user.id);
        }
    }
    for members in groups.values_mut() {
        members.sort_unstable();
    }
    Ok(groups)
}

/// Every user with its out-degree, highest first.
fn out_degrees<G>(graph: &G) -> Result<Vec<(UserId, usize)>>
where
    G: Digraph<User, Relationship>,
{
    let mut ranked = Vec::with_capacity(graph.vertex_count());
    for v in graph.vertices() {
        ranked.push((graph.element(v)?.id, graph.out_degree(v)?));
    }
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    Ok(ranked)
}

/// Every interest with the number of edges annotated with it, highest first.
fn interest_sharing<G>(graph: &G) -> Result<Vec<(InterestId, usize)>>
where
    G: Digraph<User, Relationship>,
{
    let mut counts: BTreeMap<InterestId, usize> = BTreeMap::new();
    for e in graph.edges() {
        for interest in graph.payload(e)?.shared_interests() {
            *counts.entry(interest).or_default() += 1;
        }
    }
    let mut ranked: Vec<_> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    Ok(ranked)
}

/// The user with the most outbound relationships.
pub fn most_out_degree<G>(graph: &G) -> Result<Option<(UserId, usize)>>
where
    G: Digraph<User, Relationship>,
{
    Ok(out_degrees(graph)?.into_iter().next())
}

/// The interest annotated on the most edges. `None` when no edge is `Indirect`.
pub fn most_shared_interest<G>(graph: &G) -> Result<Option<(InterestId, usize)>>
where
    G: Digraph<User, Relationship>,
{
    Ok(interest_sharing(graph)?.into_iter().next())
}

pub fn top_users_by_out_degree<G>(graph: &G, k: usize) -> Result<Vec<(UserId, usize)>>
where
    G: Digraph<User, Relationship>,
{
    let mut ranked = out_degrees(graph)?;
    ranked.truncate(k);
    Ok(ranked)
}

pub fn top_interests_by_sharing<G>(graph: &G, k: usize) -> Result<Vec<(InterestId, usize)>>
where
    G: Digraph<User, Relationship>,
{
    let mut ranked = interest_sharing(graph)?;
    ranked.truncate(k);
    Ok(ranked)
}

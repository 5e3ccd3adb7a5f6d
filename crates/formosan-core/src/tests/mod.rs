mod proptest_convert;

use crate::rules::RuleTable;
use crate::FormosanG2p;

/// Small multi-language rule source shared by the integration-style tests.
pub(super) const TEST_RULES_CSV: &str = "\
Language,Dialect,ng,tj,dj,lj,lr,ʉ,',R,S,a,i,e,n,t,k,s,r,m,p
Amis,-,ŋ,-,-,-,-,-,ʔ,-,-,a,i,ə,n,t,k,s,r,m,p
Paiwan,-,ŋ,c,ɟ,ʎ,-,-,ʔ,-,-,a,i,ə,n,t,k,s,r,m,p
Rukai,Budai,ŋ,-,-,-,ɭ,ʉ,ʔ,-,-,a,i,ə,n,t,k,s,r,m,p
賽夏,-,ŋ,-,-,-,-,-,ʔ,-,ʃ,a,i,ə,n,t,k,s,r,m,p
噶瑪蘭,-,ŋ,-,-,-,-,-,ʔ,ʁ,-,a,i,ə,n,t,k,s,\"ɾ,r\",m,p
";

pub(super) fn make_test_table() -> RuleTable {
    RuleTable::from_csv_str_with_placeholder(TEST_RULES_CSV, "-").unwrap()
}

pub(super) fn make_test_engine() -> FormosanG2p {
    FormosanG2p::new(make_test_table())
}
